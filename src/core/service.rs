//! Service trait for document storage

use crate::core::entity::Entity;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Service trait for managing one collection of documents
///
/// Implementations provide CRUD operations for a specific document type.
/// Unique-field violations are reported as
/// [`StorageError::DuplicateKey`](crate::core::error::StorageError) wrapped in
/// the returned `anyhow::Error`.
#[async_trait]
pub trait DataService<T: Entity>: Send + Sync {
    /// Insert a new document
    async fn create(&self, entity: T) -> Result<T>;

    /// Get a document by ID
    async fn get(&self, id: &Uuid) -> Result<Option<T>>;

    /// List all documents, newest first
    async fn list(&self) -> Result<Vec<T>>;

    /// Replace an existing document
    async fn update(&self, id: &Uuid, entity: T) -> Result<T>;

    /// Delete a document, returning it if it existed
    async fn delete(&self, id: &Uuid) -> Result<Option<T>>;

    /// Find documents whose field equals the given value
    async fn search(&self, field: &str, value: &str) -> Result<Vec<T>>;

    /// Find the first document whose field equals the given value
    async fn find_one(&self, field: &str, value: &str) -> Result<Option<T>> {
        Ok(self.search(field, value).await?.into_iter().next())
    }

    /// Count documents
    async fn count(&self) -> Result<usize> {
        Ok(self.list().await?.len())
    }
}
