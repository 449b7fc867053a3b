//! Entity trait shared by every persisted document

use crate::core::field::FieldValue;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// Base trait for all persisted documents.
///
/// Every document has:
/// - id: unique identifier (stored as the database `_id`)
/// - created_at / updated_at: timestamps maintained by the services
///
/// Storage backends use `resource_name()` as the collection name and
/// `unique_fields()` to enforce (in memory) or index (MongoDB) unique keys.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The collection / plural resource name (e.g., "orders", "promo_codes")
    fn resource_name() -> &'static str;

    /// The singular name used in error messages (e.g., "order")
    fn resource_name_singular() -> &'static str;

    /// Fields whose values must be unique across the collection
    ///
    /// Names are the serialized (camelCase) field names.
    fn unique_fields() -> &'static [&'static str] {
        &[]
    }

    /// Get the unique identifier for this document
    fn id(&self) -> Uuid;

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Get the last update timestamp
    fn updated_at(&self) -> DateTime<Utc>;

    /// Bump `updated_at`
    fn touch(&mut self);

    /// Get the value of a field by its serialized name
    fn field_value(&self, field: &str) -> Option<FieldValue>;
}
