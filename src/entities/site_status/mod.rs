//! SiteStatus entity module

pub mod descriptor;
pub mod handlers;
pub mod model;

pub use descriptor::SiteStatusDescriptor;
pub use handlers::*;
pub use model::{SiteStatus, UpdateSiteStatus};
