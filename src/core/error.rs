//! Typed error handling for the storefront
//!
//! Every handler returns [`StoreError`], which knows its HTTP status and a
//! stable error code. Storage backends keep returning `anyhow::Result` and
//! signal the cases the HTTP layer must distinguish (duplicate keys) by
//! wrapping a [`StorageError`], which is recovered on conversion.
//!
//! # Error Categories
//!
//! - [`EntityError`]: missing documents, duplicates, documents still referenced
//! - [`ValidationError`]: malformed input and field-level validation failures
//! - [`PromoError`]: promo code lookup and minimum-order checks
//! - [`RequestError`]: authentication and authorization failures
//! - [`StorageError`]: storage backend failures
//! - [`ImageHostError`]: failures of the external image host
//! - [`ConfigError`]: configuration loading failures

use crate::media::ImageHostError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The main error type for the storefront
#[derive(Debug)]
pub enum StoreError {
    /// Document-level errors (CRUD operations)
    Entity(EntityError),

    /// Input validation errors
    Validation(ValidationError),

    /// Promo code errors
    Promo(PromoError),

    /// Authentication / authorization errors
    Request(RequestError),

    /// Storage backend errors
    Storage(StorageError),

    /// Image host errors
    Media(ImageHostError),

    /// Configuration errors
    Config(ConfigError),

    /// Anything else; the message is echoed to the client
    Internal(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Entity(e) => write!(f, "{}", e),
            StoreError::Validation(e) => write!(f, "{}", e),
            StoreError::Promo(e) => write!(f, "{}", e),
            StoreError::Request(e) => write!(f, "{}", e),
            StoreError::Storage(e) => write!(f, "{}", e),
            StoreError::Media(e) => write!(f, "{}", e),
            StoreError::Config(e) => write!(f, "{}", e),
            StoreError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Entity(e) => Some(e),
            StoreError::Validation(e) => Some(e),
            StoreError::Promo(e) => Some(e),
            StoreError::Request(e) => Some(e),
            StoreError::Storage(e) => Some(e),
            StoreError::Media(e) => Some(e),
            StoreError::Config(e) => Some(e),
            StoreError::Internal(_) => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl StoreError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            StoreError::Entity(e) => e.status_code(),
            StoreError::Validation(_) => StatusCode::BAD_REQUEST,
            StoreError::Promo(e) => e.status_code(),
            StoreError::Request(e) => e.status_code(),
            StoreError::Storage(e) => e.status_code(),
            StoreError::Media(e) => match e {
                ImageHostError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            StoreError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            StoreError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::Entity(e) => e.error_code(),
            StoreError::Validation(_) => "VALIDATION_ERROR",
            StoreError::Promo(e) => e.error_code(),
            StoreError::Request(e) => e.error_code(),
            StoreError::Storage(e) => e.error_code(),
            StoreError::Media(_) => "IMAGE_HOST_ERROR",
            StoreError::Config(_) => "CONFIG_ERROR",
            StoreError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    /// Shorthand for a single-field validation failure
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        StoreError::Validation(ValidationError::FieldError {
            field: field.into(),
            message: message.into(),
        })
    }

    /// Shorthand for a missing document
    pub fn not_found(entity_type: &str, id: impl ToString) -> Self {
        StoreError::Entity(EntityError::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        })
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            StoreError::Entity(EntityError::NotFound { entity_type, id }) => {
                Some(serde_json::json!({
                    "entityType": entity_type,
                    "id": id
                }))
            }
            StoreError::Validation(ValidationError::FieldError { field, message }) => {
                Some(serde_json::json!({
                    "fields": [{ "field": field, "message": message }]
                }))
            }
            StoreError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            StoreError::Promo(PromoError::BelowMinimum {
                min_order_amount, ..
            }) => Some(serde_json::json!({ "minOrderAmount": min_order_amount })),
            StoreError::Storage(StorageError::DuplicateKey { field, value, .. }) => {
                Some(serde_json::json!({ "field": field, "value": value }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to document operations
#[derive(Debug)]
pub enum EntityError {
    /// Document was not found
    NotFound { entity_type: String, id: String },

    /// Document still referenced by another collection
    InUse {
        entity_type: String,
        id: String,
        referenced_by: String,
    },
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::NotFound { entity_type, id } => {
                write!(f, "{} with id '{}' not found", entity_type, id)
            }
            EntityError::InUse {
                entity_type,
                id,
                referenced_by,
            } => {
                write!(
                    f,
                    "{} '{}' is still referenced by {}",
                    entity_type, id, referenced_by
                )
            }
        }
    }
}

impl std::error::Error for EntityError {}

impl EntityError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntityError::InUse { .. } => StatusCode::CONFLICT,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::InUse { .. } => "ENTITY_IN_USE",
        }
    }
}

impl From<EntityError> for StoreError {
    fn from(err: EntityError) -> Self {
        StoreError::Entity(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug)]
pub enum ValidationError {
    /// Single field validation error
    FieldError { field: String, message: String },

    /// Multiple field validation errors
    FieldErrors(Vec<FieldValidationError>),

    /// Invalid JSON body (syntax, types, unknown fields)
    InvalidJson { message: String },

    /// Invalid UUID format
    InvalidUuid { value: String },
}

/// A single field validation error
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::FieldError { field, message } => {
                write!(f, "Validation error for field '{}': {}", field, message)
            }
            ValidationError::FieldErrors(errors) => {
                let msgs: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Validation errors: {}", msgs.join(", "))
            }
            ValidationError::InvalidJson { message } => {
                write!(f, "Invalid JSON: {}", message)
            }
            ValidationError::InvalidUuid { value } => {
                write!(f, "Invalid UUID format: {}", value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Validation(err)
    }
}

// =============================================================================
// Promo Errors
// =============================================================================

/// Errors raised while validating a promo code against an order
#[derive(Debug, thiserror::Error)]
pub enum PromoError {
    #[error("Promo code '{code}' not found or inactive")]
    NotFound { code: String },

    #[error("Promo code '{code}' requires a minimum order of {min_order_amount:.2}")]
    BelowMinimum { code: String, min_order_amount: f64 },

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl PromoError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PromoError::NotFound { .. } => StatusCode::NOT_FOUND,
            PromoError::BelowMinimum { .. } => StatusCode::BAD_REQUEST,
            PromoError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            PromoError::NotFound { .. } => "PROMO_CODE_NOT_FOUND",
            PromoError::BelowMinimum { .. } => "PROMO_CODE_BELOW_MINIMUM",
            PromoError::Storage(_) => "STORAGE_ERROR",
        }
    }
}

impl From<PromoError> for StoreError {
    fn from(err: PromoError) -> Self {
        match err {
            PromoError::Storage(e) => StoreError::from(e),
            other => StoreError::Promo(other),
        }
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to the caller's credentials
#[derive(Debug)]
pub enum RequestError {
    /// Missing or invalid credentials
    Unauthorized { message: String },

    /// Valid credentials without the required role
    Forbidden { message: String },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::Unauthorized { message } => write!(f, "Unauthorized: {}", message),
            RequestError::Forbidden { message } => write!(f, "Forbidden: {}", message),
        }
    }
}

impl std::error::Error for RequestError {}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            RequestError::Forbidden { .. } => StatusCode::FORBIDDEN,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::Unauthorized { .. } => "UNAUTHORIZED",
            RequestError::Forbidden { .. } => "FORBIDDEN",
        }
    }
}

impl From<RequestError> for StoreError {
    fn from(err: RequestError) -> Self {
        StoreError::Request(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug)]
pub enum StorageError {
    /// A unique constraint was violated
    DuplicateKey {
        collection: String,
        field: String,
        value: String,
    },

    /// Connection error
    ConnectionError { backend: String, message: String },

    /// Query execution error
    QueryError { backend: String, message: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::DuplicateKey {
                collection,
                field,
                value,
            } => {
                write!(
                    f,
                    "Duplicate value '{}' for unique field '{}' in {}",
                    value, field, collection
                )
            }
            StorageError::ConnectionError { backend, message } => {
                write!(f, "Failed to connect to {}: {}", backend, message)
            }
            StorageError::QueryError { backend, message } => {
                write!(f, "{} query error: {}", backend, message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl StorageError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            StorageError::DuplicateKey { .. } => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::DuplicateKey { .. } => "DUPLICATE_KEY",
            _ => "STORAGE_ERROR",
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(err: StorageError) -> Self {
        StoreError::Storage(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Configuration file not found
    FileNotFound { path: String },

    /// Failed to parse configuration
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// A required setting is missing or invalid
    InvalidValue { key: String, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound { path } => {
                write!(f, "Configuration file not found: {}", path)
            }
            ConfigError::ParseError { file, message } => match file {
                Some(file) => write!(f, "Failed to parse {}: {}", file, message),
                None => write!(f, "Failed to parse configuration: {}", message),
            },
            ConfigError::InvalidValue { key, message } => {
                write!(f, "Invalid configuration value for '{}': {}", key, message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for StoreError {
    fn from(err: ConfigError) -> Self {
        StoreError::Config(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<ImageHostError> for StoreError {
    fn from(err: ImageHostError) -> Self {
        StoreError::Media(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Validation(ValidationError::InvalidJson {
            message: err.to_string(),
        })
    }
}

impl From<uuid::Error> for StoreError {
    fn from(err: uuid::Error) -> Self {
        StoreError::Validation(ValidationError::InvalidUuid {
            value: err.to_string(),
        })
    }
}

impl From<validator::ValidationErrors> for StoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields = Vec::new();
        flatten_validation_errors("", &errors, &mut fields);
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        StoreError::Validation(ValidationError::FieldErrors(fields))
    }
}

/// Flatten nested `validator` errors into dotted field paths (`items[0].quantity`)
fn flatten_validation_errors(
    prefix: &str,
    errors: &validator::ValidationErrors,
    out: &mut Vec<FieldValidationError>,
) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                for e in list {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("failed '{}' check", e.code));
                    out.push(FieldValidationError {
                        field: path.clone(),
                        message,
                    });
                }
            }
            ValidationErrorsKind::Struct(inner) => {
                flatten_validation_errors(&path, inner, out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    flatten_validation_errors(&format!("{}[{}]", path, index), inner, out);
                }
            }
        }
    }
}

/// Storage backends return `anyhow::Error`; typed storage errors are recovered here
impl From<anyhow::Error> for StoreError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<StorageError>() {
            Ok(storage) => StoreError::Storage(storage),
            Err(err) => match err.downcast::<StoreError>() {
                Ok(store) => store,
                Err(err) => StoreError::Internal(err.to_string()),
            },
        }
    }
}

/// A specialized Result type for storefront operations
pub type StoreResult<T> = Result<T, StoreError>;
