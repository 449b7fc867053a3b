//! Category entity module

pub mod descriptor;
pub mod handlers;
pub mod model;

pub use descriptor::CategoryDescriptor;
pub use handlers::*;
pub use model::{Category, CreateCategory, UpdateCategory};
