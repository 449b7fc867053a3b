//! API exposure
//!
//! An exposure consumes a `ServerHost` and produces a Router for its protocol.
//! The storefront speaks JSON over HTTP only.

pub mod rest;

pub use rest::RestExposure;
