//! Product entity module

pub mod descriptor;
pub mod handlers;
pub mod model;

pub use descriptor::ProductDescriptor;
pub use handlers::*;
pub use model::{
    CreateProduct, Gender, Product, ProductQuery, ProductSort, ProductTag, UpdateProduct,
};
