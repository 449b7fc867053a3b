//! In-memory implementation of DataService for testing and development

use crate::core::error::StorageError;
use crate::core::{DataService, Entity};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory document collection
///
/// Useful for testing and development. Unique fields declared by
/// `T::unique_fields()` are enforced on create and update, mirroring the
/// unique indexes of the MongoDB backend.
#[derive(Clone)]
pub struct InMemoryDataService<T> {
    documents: Arc<RwLock<HashMap<Uuid, T>>>,
}

impl<T: Entity> InMemoryDataService<T> {
    /// Create a new empty collection
    pub fn new() -> Self {
        Self {
            documents: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn check_unique(documents: &HashMap<Uuid, T>, candidate: &T) -> Result<()> {
        for field in T::unique_fields() {
            let Some(key) = candidate.field_value(field).and_then(|v| v.as_key()) else {
                continue;
            };

            let clash = documents.values().any(|existing| {
                existing.id() != candidate.id()
                    && existing
                        .field_value(field)
                        .and_then(|v| v.as_key())
                        .is_some_and(|k| k == key)
            });

            if clash {
                return Err(StorageError::DuplicateKey {
                    collection: T::resource_name().to_string(),
                    field: field.to_string(),
                    value: key,
                }
                .into());
            }
        }
        Ok(())
    }
}

impl<T: Entity> Default for InMemoryDataService<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> DataService<T> for InMemoryDataService<T> {
    async fn create(&self, entity: T) -> Result<T> {
        let mut documents = self.documents.write().await;

        if documents.contains_key(&entity.id()) {
            return Err(StorageError::DuplicateKey {
                collection: T::resource_name().to_string(),
                field: "id".to_string(),
                value: entity.id().to_string(),
            }
            .into());
        }
        Self::check_unique(&documents, &entity)?;

        documents.insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<T>> {
        Ok(self.documents.read().await.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<T>> {
        let documents = self.documents.read().await;
        let mut all: Vec<T> = documents.values().cloned().collect();
        all.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(all)
    }

    async fn update(&self, id: &Uuid, entity: T) -> Result<T> {
        let mut documents = self.documents.write().await;

        if !documents.contains_key(id) {
            return Err(anyhow!(
                "{} not found: {}",
                T::resource_name_singular(),
                id
            ));
        }
        Self::check_unique(&documents, &entity)?;

        documents.insert(*id, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: &Uuid) -> Result<Option<T>> {
        Ok(self.documents.write().await.remove(id))
    }

    async fn search(&self, field: &str, value: &str) -> Result<Vec<T>> {
        let documents = self.documents.read().await;
        let mut found: Vec<T> = documents
            .values()
            .filter(|doc| doc.field_value(field).is_some_and(|v| v.matches(value)))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(found)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.documents.read().await.len())
    }
}
