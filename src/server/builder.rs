//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::RestExposure;
use super::host::ServerHost;
use crate::commerce::{CartStorage, InMemoryCartStorage, InMemoryWishlistStorage, WishlistStorage};
use crate::config::CatalogConfig;
use crate::core::{AuthProvider, NoAuthProvider};
use crate::media::{ImageHost, InMemoryImageHost};
use crate::storage::Collections;
use anyhow::Result;
use axum::Router;
use axum::http::HeaderValue;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Builder for creating the storefront HTTP server
///
/// Every collaborator has an in-process default, so a bare builder serves a
/// working (if forgetful) storefront whose admin routes reject every caller.
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_collections(Collections::in_memory())
///     .with_auth_provider(JwtAuthProvider::new("secret"))
///     .build()?;
/// ```
pub struct ServerBuilder {
    collections: Option<Collections>,
    images: Option<Arc<dyn ImageHost>>,
    auth: Option<Arc<dyn AuthProvider>>,
    carts: Option<Arc<dyn CartStorage>>,
    wishlists: Option<Arc<dyn WishlistStorage>>,
    catalog: CatalogConfig,
    cors_origins: Vec<String>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            collections: None,
            images: None,
            auth: None,
            carts: None,
            wishlists: None,
            catalog: CatalogConfig::default(),
            cors_origins: Vec::new(),
            custom_routes: Vec::new(),
        }
    }

    /// Set the document collections (in-memory when not set)
    pub fn with_collections(mut self, collections: Collections) -> Self {
        self.collections = Some(collections);
        self
    }

    /// Set the image host (in-memory when not set)
    pub fn with_image_host(mut self, images: impl ImageHost + 'static) -> Self {
        self.images = Some(Arc::new(images));
        self
    }

    /// Set the provider resolving callers for the admin guard
    pub fn with_auth_provider(mut self, auth: impl AuthProvider + 'static) -> Self {
        self.auth = Some(Arc::new(auth));
        self
    }

    pub fn with_cart_storage(mut self, storage: impl CartStorage + 'static) -> Self {
        self.carts = Some(Arc::new(storage));
        self
    }

    pub fn with_wishlist_storage(mut self, storage: impl WishlistStorage + 'static) -> Self {
        self.wishlists = Some(Arc::new(storage));
        self
    }

    pub fn with_catalog_config(mut self, catalog: CatalogConfig) -> Self {
        self.catalog = catalog;
        self
    }

    /// Restrict CORS to these origins; any origin is allowed when empty
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = origins;
        self
    }

    /// Add custom routes, merged under `/api` outside the admin guard
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the host, filling unset collaborators with in-memory defaults
    pub fn build_host(self) -> ServerHost {
        let collections = self.collections.unwrap_or_else(Collections::in_memory);
        let images = self
            .images
            .unwrap_or_else(|| Arc::new(InMemoryImageHost::new()));
        let auth = self.auth.unwrap_or_else(|| {
            tracing::warn!("no auth provider configured; admin routes will reject every request");
            Arc::new(NoAuthProvider)
        });
        let carts = self
            .carts
            .unwrap_or_else(|| Arc::new(InMemoryCartStorage::new()));
        let wishlists = self
            .wishlists
            .unwrap_or_else(|| Arc::new(InMemoryWishlistStorage::new()));

        ServerHost::from_builder_components(
            collections,
            images,
            auth,
            carts,
            wishlists,
            self.catalog,
        )
    }

    /// Build the final REST router with CORS and request tracing
    pub fn build(mut self) -> Result<Router> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let cors = cors_layer(&self.cors_origins)?;
        let host = Arc::new(self.build_host());

        Ok(RestExposure::build_router(host, custom_routes)?
            .layer(cors)
            .layer(TraceLayer::new_for_http()))
    }

    /// Serve the application with graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        let origins = origins
            .iter()
            .map(|o| HeaderValue::from_str(o))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("invalid CORS origin: {}", e))?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any))
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
