//! Request validation and input normalisation
//!
//! Input DTOs derive `validator::Validate`; the [`Validated`] extractor runs
//! those rules after deserialization. The [`filters`] helpers normalise values
//! (trim, uppercase codes, slugs, money rounding) before they are stored.

pub mod extractor;
pub mod filters;

pub use extractor::{JsonBody, Validated};
