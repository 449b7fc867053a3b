//! Server module for building the storefront HTTP server
//!
//! `ServerBuilder` collects the collaborators (collections, image host, auth
//! provider, cart and wishlist storage), `ServerHost` wires them into entity
//! descriptors, and `RestExposure` turns the host into an Axum router.

pub mod builder;
pub mod entity_registry;
pub mod exposure;
pub mod host;
pub mod router;

pub use builder::ServerBuilder;
pub use entity_registry::{EntityDescriptor, EntityRegistry};
pub use exposure::RestExposure;
pub use host::ServerHost;
