//! PromoCode entity module

pub mod descriptor;
pub mod handlers;
pub mod model;

pub use descriptor::PromoCodeDescriptor;
pub use handlers::*;
pub use model::{CreatePromoCode, PromoCode, ValidatePromoCode};
