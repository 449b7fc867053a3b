//! # Storefront
//!
//! REST backend for a small online shop and its admin back office.
//!
//! ## Features
//!
//! - **Catalog**: products, categories, product types and customer reviews
//! - **Checkout**: server-side order totals, promo codes and order ids
//! - **Order Lifecycle**: a status workflow with receipt handling
//! - **Back Office**: admin routes behind a JWT guard, dashboard statistics
//! - **Site Status**: a maintenance switch read by the storefront
//! - **Carts & Wishlists**: anonymous shopping state keyed by client ids
//! - **Pluggable Storage**: in-memory by default, MongoDB behind a feature
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use storefront::prelude::*;
//!
//! let app = ServerBuilder::new()
//!     .with_collections(Collections::in_memory())
//!     .with_auth_provider(JwtAuthProvider::new("secret"))
//!     .build()?;
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod commerce;
pub mod config;
pub mod core;
pub mod entities;
pub mod media;
pub mod server;
pub mod shopping;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        AuthContext, AuthProvider, DataService, Entity, JwtAuthProvider,
        NoAuthProvider, PageRequest, PaginatedResponse, StoreError, StoreResult,
    };

    // === Commerce ===
    pub use crate::commerce::{
        CartService, CartStorage, InMemoryCartStorage, InMemoryWishlistStorage, OrderService,
        OrderStatus, PromoCodeValidator, WishlistService, WishlistStorage,
    };

    // === Storage & Media ===
    pub use crate::media::{CloudinaryImageHost, ImageHost, InMemoryImageHost};
    pub use crate::storage::{Collections, InMemoryDataService};
    #[cfg(feature = "mongodb_backend")]
    pub use crate::storage::MongoDataService;

    // === Config ===
    pub use crate::config::{AppConfig, CatalogConfig};

    // === Server ===
    pub use crate::server::{EntityDescriptor, EntityRegistry, ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
