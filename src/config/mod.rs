//! Configuration loading and management
//!
//! Settings come from a YAML file (path in `STOREFRONT_CONFIG`, default
//! `config/storefront.yaml`); a missing file means defaults. Secrets and
//! deployment-specific values can be overridden from the environment.

use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config/storefront.yaml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP server binds to
    pub bind: String,

    /// Allowed CORS origins; empty allows any origin
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:3000".to_string(),
            cors_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 secret shared with the token issuer
    pub jwt_secret: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    #[default]
    Memory,
    Mongodb,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub backend: DatabaseBackend,
    pub uri: Option<String>,
    pub name: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: DatabaseBackend::Memory,
            uri: None,
            name: "storefront".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaProvider {
    #[default]
    Memory,
    Cloudinary,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    pub provider: MediaProvider,
    pub cloud_name: Option<String>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Products at or below this stock count are "low stock" on the dashboard
    pub low_stock_threshold: u32,
    pub standard_delivery_days: i64,
    pub express_delivery_days: i64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold: 5,
            standard_delivery_days: 5,
            express_delivery_days: 2,
        }
    }
}

/// Complete service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub database: DatabaseConfig,
    pub media: MediaConfig,
    pub catalog: CatalogConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.display().to_string()),
            message: e.to_string(),
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            file: None,
            message: e.to_string(),
        })
    }

    /// Load from `STOREFRONT_CONFIG` (or the default path), apply environment
    /// overrides and validate
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// [`AppConfig::load`] with an injectable environment lookup
    pub fn load_with(env: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let explicit = env("STOREFRONT_CONFIG");
        let path = explicit.clone().unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

        let mut config = if Path::new(&path).exists() {
            Self::from_yaml_file(&path)?
        } else if explicit.is_some() {
            return Err(ConfigError::FileNotFound { path });
        } else {
            Self::default()
        };

        config.apply_env(env);
        config.validate()?;
        Ok(config)
    }

    /// Override settings from environment variables
    pub fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(bind) = env("STOREFRONT_BIND") {
            self.server.bind = bind;
        }
        if let Some(secret) = env("JWT_SECRET") {
            self.auth.jwt_secret = Some(secret);
        }
        if let Some(uri) = env("MONGODB_URI") {
            self.database.uri = Some(uri);
            self.database.backend = DatabaseBackend::Mongodb;
        }
        if let Some(name) = env("MONGODB_DATABASE") {
            self.database.name = name;
        }
        if let Some(cloud_name) = env("CLOUDINARY_CLOUD_NAME") {
            self.media.cloud_name = Some(cloud_name);
            self.media.provider = MediaProvider::Cloudinary;
        }
        if let Some(api_key) = env("CLOUDINARY_API_KEY") {
            self.media.api_key = Some(api_key);
        }
        if let Some(api_secret) = env("CLOUDINARY_API_SECRET") {
            self.media.api_secret = Some(api_secret);
        }
    }

    /// Check that the selected backends have what they need
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.backend == DatabaseBackend::Mongodb && self.database.uri.is_none() {
            return Err(ConfigError::InvalidValue {
                key: "database.uri".to_string(),
                message: "required for the mongodb backend".to_string(),
            });
        }

        if self.media.provider == MediaProvider::Cloudinary {
            for (key, value) in [
                ("media.cloud_name", &self.media.cloud_name),
                ("media.api_key", &self.media.api_key),
                ("media.api_secret", &self.media.api_secret),
            ] {
                if value.as_deref().is_none_or(str::is_empty) {
                    return Err(ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: "required for the cloudinary provider".to_string(),
                    });
                }
            }
        }

        if self.auth.jwt_secret.as_deref().is_some_and(str::is_empty) {
            return Err(ConfigError::InvalidValue {
                key: "auth.jwt_secret".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        Ok(())
    }
}
