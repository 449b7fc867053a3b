//! REST API exposure
//!
//! Consumes a `ServerHost` and produces the Axum `Router`:
//!
//! - `/api/health`
//! - public entity routes and cart/wishlist routes under `/api`
//! - admin entity routes under `/api/admin`, behind one admin guard layer

use super::super::host::ServerHost;
use crate::core::auth::{AuthGuard, enforce};
use crate::server::router::build_shopping_routes;
use crate::shopping::ShoppingAppState;
use anyhow::Result;
use axum::{Json, Router, middleware, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// `custom_routes` are merged under `/api` without the admin guard.
    pub fn build_router(host: Arc<ServerHost>, custom_routes: Vec<Router>) -> Result<Router> {
        let shopping_state = ShoppingAppState {
            carts: host.carts.clone(),
            wishlists: host.wishlists.clone(),
            products: host.collections.products.clone(),
        };

        let admin_routes = host
            .entity_registry
            .build_admin_routes()
            .route_layer(middleware::from_fn_with_state(
                AuthGuard::admin(host.auth.clone()),
                enforce,
            ));

        let mut api = Self::health_routes()
            .merge(host.entity_registry.build_routes())
            .merge(build_shopping_routes(shopping_state));

        for custom_router in custom_routes {
            api = api.merge(custom_router);
        }

        Ok(Router::new().nest("/api", api.nest("/admin", admin_routes)))
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "storefront"
        }))
    }
}
