//! Core traits and types shared by every part of the storefront

pub mod auth;
pub mod entity;
pub mod error;
pub mod field;
pub mod query;
pub mod service;
pub mod validation;

pub use auth::{AuthContext, AuthGuard, AuthProvider, JwtAuthProvider, NoAuthProvider};
pub use entity::Entity;
pub use error::{StoreError, StoreResult};
pub use field::FieldValue;
pub use query::{PageRequest, PaginatedResponse, PaginationMeta};
pub use service::DataService;
