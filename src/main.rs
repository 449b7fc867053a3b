//! Storefront server
//!
//! Reads `config/storefront.yaml` (or `STOREFRONT_CONFIG`), applies
//! environment overrides and serves the REST API.

use anyhow::Result;
use storefront::config::{AppConfig, DatabaseBackend, MediaProvider};
use storefront::core::JwtAuthProvider;
use storefront::media::CloudinaryImageHost;
use storefront::media::cloudinary::CloudinaryCredentials;
use storefront::server::ServerBuilder;
use storefront::storage::Collections;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("storefront=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::load()?;

    let mut builder = ServerBuilder::new()
        .with_collections(collections(&config).await?)
        .with_catalog_config(config.catalog.clone())
        .with_cors_origins(config.server.cors_origins.clone());

    if config.media.provider == MediaProvider::Cloudinary {
        builder = builder.with_image_host(CloudinaryImageHost::new(CloudinaryCredentials {
            cloud_name: config.media.cloud_name.clone().unwrap_or_default(),
            api_key: config.media.api_key.clone().unwrap_or_default(),
            api_secret: config.media.api_secret.clone().unwrap_or_default(),
        }));
        tracing::info!("images hosted on cloudinary");
    } else {
        tracing::info!("images kept in memory");
    }

    match config.auth.jwt_secret.as_deref() {
        Some(secret) => builder = builder.with_auth_provider(JwtAuthProvider::new(secret)),
        None => tracing::warn!("JWT_SECRET not set; admin routes are disabled"),
    }

    tracing::info!("🚀 Starting storefront v{}", env!("CARGO_PKG_VERSION"));
    builder.serve(&config.server.bind).await
}

#[cfg(feature = "mongodb_backend")]
async fn collections(config: &AppConfig) -> Result<Collections> {
    if config.database.backend == DatabaseBackend::Mongodb {
        let uri = config
            .database
            .uri
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("database.uri is required for mongodb"))?;
        let client = mongodb::Client::with_uri_str(uri).await?;
        tracing::info!(database = %config.database.name, "using mongodb storage");
        return Collections::mongodb(client.database(&config.database.name)).await;
    }
    Ok(Collections::in_memory())
}

#[cfg(not(feature = "mongodb_backend"))]
async fn collections(config: &AppConfig) -> Result<Collections> {
    if config.database.backend == DatabaseBackend::Mongodb {
        anyhow::bail!("mongodb backend requested but the mongodb_backend feature is disabled");
    }
    tracing::warn!("using in-memory storage; data is lost on restart");
    Ok(Collections::in_memory())
}
