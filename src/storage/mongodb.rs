//! MongoDB storage backend using the official MongoDB async driver.
//!
//! Provides `MongoDataService<T>` backed by a MongoDB database via
//! `mongodb::Database`.
//!
//! # Feature flag
//!
//! This module is gated behind the `mongodb_backend` feature flag.
//!
//! # Storage model
//!
//! MongoDB uses a **collection-per-document-type** pattern. Each
//! `MongoDataService<T>` operates on the collection named after
//! `T::resource_name()` (e.g., "orders", "promo_codes").
//!
//! # Serialization strategy
//!
//! Documents are serialized via `serde_json::Value` as an intermediate format,
//! then converted to BSON. UUIDs and timestamps are therefore stored as strings.
//! The `id` field is mapped to MongoDB's `_id` convention.

use crate::core::error::StorageError;
use crate::core::{DataService, Entity};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::Database;
use mongodb::bson::{Bson, Document, doc};
use mongodb::error::{ErrorKind, WriteFailure};
use uuid::Uuid;

const DUPLICATE_KEY_CODE: i32 = 11000;

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Convert a serde_json::Value (expected to be an Object) into a BSON Document,
/// renaming `id` → `_id` for MongoDB convention.
fn json_to_document(json: serde_json::Value) -> Result<Document> {
    let bson_val = mongodb::bson::to_bson(&json)
        .map_err(|e| anyhow!("Failed to convert JSON to BSON: {}", e))?;

    let mut doc = match bson_val {
        Bson::Document(d) => d,
        _ => return Err(anyhow!("Expected BSON document, got non-object")),
    };

    if let Some(id) = doc.remove("id") {
        doc.insert("_id", id);
    }

    Ok(doc)
}

/// Convert a BSON Document back into a serde_json::Value,
/// renaming `_id` → `id` for domain convention.
fn document_to_json(mut doc: Document) -> serde_json::Value {
    if let Some(id) = doc.remove("_id") {
        doc.insert("id", id);
    }

    Bson::Document(doc).into_relaxed_extjson()
}

/// Convert a UUID to its BSON string representation for queries.
fn uuid_bson(id: &Uuid) -> Bson {
    Bson::String(id.to_string())
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY_CODE
    )
}

// ---------------------------------------------------------------------------
// MongoDataService<T>
// ---------------------------------------------------------------------------

/// Generic document storage service backed by MongoDB.
///
/// # Example
///
/// ```rust,ignore
/// use mongodb::Client;
/// use storefront::storage::MongoDataService;
///
/// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
/// let db = client.database("storefront");
/// let orders = MongoDataService::<Order>::new(db);
/// orders.ensure_indexes().await?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoDataService<T> {
    database: Database,
    _marker: std::marker::PhantomData<T>,
}

impl<T> MongoDataService<T> {
    /// Create a new `MongoDataService` with the given database handle.
    pub fn new(database: Database) -> Self {
        Self {
            database,
            _marker: std::marker::PhantomData,
        }
    }

    /// Get a reference to the underlying database.
    pub fn database(&self) -> &Database {
        &self.database
    }
}

impl<T: Entity> MongoDataService<T> {
    fn collection(&self) -> mongodb::Collection<Document> {
        self.database.collection(T::resource_name())
    }

    /// Create one unique index per `T::unique_fields()` entry.
    ///
    /// Idempotent; safe to call on every startup.
    pub async fn ensure_indexes(&self) -> Result<()> {
        use mongodb::IndexModel;
        use mongodb::options::IndexOptions;

        let indexes: Vec<IndexModel> = T::unique_fields()
            .iter()
            .map(|&field| {
                IndexModel::builder()
                    .keys(doc! { field: 1 })
                    .options(IndexOptions::builder().unique(true).build())
                    .build()
            })
            .collect();

        if indexes.is_empty() {
            return Ok(());
        }

        self.collection()
            .create_indexes(indexes)
            .await
            .map_err(|e| {
                anyhow!(
                    "Failed to create indexes on {} collection: {}",
                    T::resource_name(),
                    e
                )
            })?;

        Ok(())
    }

    fn entity_to_document(entity: &T) -> Result<Document> {
        let json = serde_json::to_value(entity)
            .map_err(|e| anyhow!("Failed to serialize document: {}", e))?;
        json_to_document(json)
    }

    fn document_to_entity(doc: Document) -> Result<T> {
        let json = document_to_json(doc);
        serde_json::from_value(json)
            .map_err(|e| anyhow!("Failed to deserialize {}: {}", T::resource_name_singular(), e))
    }

    fn write_error(operation: &str, err: mongodb::error::Error) -> anyhow::Error {
        if is_duplicate_key(&err) {
            return StorageError::DuplicateKey {
                collection: T::resource_name().to_string(),
                field: T::unique_fields().join(","),
                value: err.to_string(),
            }
            .into();
        }
        StorageError::QueryError {
            backend: "MongoDB".to_string(),
            message: format!("{} {}: {}", operation, T::resource_name_singular(), err),
        }
        .into()
    }

    async fn collect(&self, filter: Document) -> Result<Vec<T>> {
        let cursor = self
            .collection()
            .find(filter)
            .sort(doc! { "createdAt": -1 })
            .await
            .map_err(|e| anyhow!("Failed to query {}: {}", T::resource_name(), e))?;

        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| anyhow!("Failed to collect {}: {}", T::resource_name(), e))?;

        docs.into_iter().map(Self::document_to_entity).collect()
    }
}

#[async_trait]
impl<T: Entity> DataService<T> for MongoDataService<T> {
    async fn create(&self, entity: T) -> Result<T> {
        let doc = Self::entity_to_document(&entity)?;

        self.collection()
            .insert_one(doc)
            .await
            .map_err(|e| Self::write_error("create", e))?;

        Ok(entity)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<T>> {
        let doc = self
            .collection()
            .find_one(doc! { "_id": uuid_bson(id) })
            .await
            .map_err(|e| anyhow!("Failed to get {}: {}", T::resource_name_singular(), e))?;

        doc.map(Self::document_to_entity).transpose()
    }

    async fn list(&self) -> Result<Vec<T>> {
        self.collect(doc! {}).await
    }

    /// Returns `Err` if the document does not exist (no document matched).
    async fn update(&self, id: &Uuid, entity: T) -> Result<T> {
        let doc = Self::entity_to_document(&entity)?;

        let result = self
            .collection()
            .replace_one(doc! { "_id": uuid_bson(id) }, doc)
            .await
            .map_err(|e| Self::write_error("update", e))?;

        if result.matched_count == 0 {
            return Err(anyhow!("{} not found: {}", T::resource_name_singular(), id));
        }

        Ok(entity)
    }

    async fn delete(&self, id: &Uuid) -> Result<Option<T>> {
        let removed = self
            .collection()
            .find_one_and_delete(doc! { "_id": uuid_bson(id) })
            .await
            .map_err(|e| Self::write_error("delete", e))?;

        removed.map(Self::document_to_entity).transpose()
    }

    /// Search documents by field value.
    ///
    /// Values arrive as strings but MongoDB stores native BSON types, so the
    /// filter uses `$in` over the plausible type variants.
    async fn search(&self, field: &str, value: &str) -> Result<Vec<T>> {
        let mut variants: Vec<Bson> = vec![Bson::String(value.to_string())];

        match value {
            "true" => variants.push(Bson::Boolean(true)),
            "false" => variants.push(Bson::Boolean(false)),
            _ => {
                if let Ok(i) = value.parse::<i64>() {
                    variants.push(Bson::Int64(i));
                }
                if value.contains('.')
                    && let Ok(f) = value.parse::<f64>()
                {
                    variants.push(Bson::Double(f));
                }
            }
        }

        let filter = match variants.as_slice() {
            [single] => doc! { field: single.clone() },
            _ => doc! { field: { "$in": variants } },
        };

        self.collect(filter).await
    }

    async fn count(&self) -> Result<usize> {
        let n = self
            .collection()
            .count_documents(doc! {})
            .await
            .map_err(|e| anyhow!("Failed to count {}: {}", T::resource_name(), e))?;
        Ok(n as usize)
    }
}
