//! Review entity module

pub mod descriptor;
pub mod handlers;
pub mod model;

pub use descriptor::ReviewDescriptor;
pub use handlers::*;
pub use model::{CreateReview, RatingSummary, Review, ReviewQuery};
