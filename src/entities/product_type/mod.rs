//! ProductType entity module

pub mod descriptor;
pub mod handlers;
pub mod model;

pub use descriptor::ProductTypeDescriptor;
pub use handlers::*;
pub use model::{CreateProductType, ProductType, UpdateProductType};
