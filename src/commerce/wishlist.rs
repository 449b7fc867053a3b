//! Wishlist service over injected storage

use crate::core::error::StoreResult;
use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

#[async_trait]
pub trait WishlistStorage: Send + Sync {
    async fn load(&self, wishlist_id: &str) -> anyhow::Result<Vec<Uuid>>;

    async fn save(&self, wishlist_id: &str, products: Vec<Uuid>) -> anyhow::Result<()>;
}

#[async_trait]
impl<S: WishlistStorage + ?Sized> WishlistStorage for Arc<S> {
    async fn load(&self, wishlist_id: &str) -> anyhow::Result<Vec<Uuid>> {
        (**self).load(wishlist_id).await
    }

    async fn save(&self, wishlist_id: &str, products: Vec<Uuid>) -> anyhow::Result<()> {
        (**self).save(wishlist_id, products).await
    }
}

#[derive(Clone, Default)]
pub struct InMemoryWishlistStorage {
    lists: Arc<RwLock<HashMap<String, Vec<Uuid>>>>,
}

impl InMemoryWishlistStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WishlistStorage for InMemoryWishlistStorage {
    async fn load(&self, wishlist_id: &str) -> anyhow::Result<Vec<Uuid>> {
        Ok(self
            .lists
            .read()
            .await
            .get(wishlist_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn save(&self, wishlist_id: &str, products: Vec<Uuid>) -> anyhow::Result<()> {
        let mut lists = self.lists.write().await;
        if products.is_empty() {
            lists.remove(wishlist_id);
        } else {
            lists.insert(wishlist_id.to_string(), products);
        }
        Ok(())
    }
}

/// Result of a toggle: whether the product is now on the list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistToggle {
    pub product_id: Uuid,
    pub wishlisted: bool,
    pub products: Vec<Uuid>,
}

pub struct WishlistService<S: WishlistStorage> {
    storage: S,
    writes: Mutex<()>,
}

impl<S: WishlistStorage> WishlistService<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            writes: Mutex::new(()),
        }
    }

    /// Products on the list, in the order they were added
    pub async fn list(&self, wishlist_id: &str) -> StoreResult<Vec<Uuid>> {
        Ok(self.storage.load(wishlist_id).await?)
    }

    pub async fn contains(&self, wishlist_id: &str, product_id: &Uuid) -> StoreResult<bool> {
        Ok(self.storage.load(wishlist_id).await?.contains(product_id))
    }

    /// Add the product if absent, remove it if present
    pub async fn toggle(&self, wishlist_id: &str, product_id: Uuid) -> StoreResult<WishlistToggle> {
        let _guard = self.writes.lock().await;
        let mut products = self.storage.load(wishlist_id).await?;
        let wishlisted = match products.iter().position(|p| *p == product_id) {
            Some(index) => {
                products.remove(index);
                false
            }
            None => {
                products.push(product_id);
                true
            }
        };

        self.storage.save(wishlist_id, products.clone()).await?;
        Ok(WishlistToggle {
            product_id,
            wishlisted,
            products,
        })
    }

    pub async fn clear(&self, wishlist_id: &str) -> StoreResult<()> {
        let _guard = self.writes.lock().await;
        self.storage.save(wishlist_id, Vec::new()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_toggle_adds_then_removes() {
        let wishlist = WishlistService::new(InMemoryWishlistStorage::new());
        let product = Uuid::new_v4();

        let toggled = wishlist.toggle("w1", product).await.unwrap();
        assert!(toggled.wishlisted);
        assert!(wishlist.contains("w1", &product).await.unwrap());

        let toggled = wishlist.toggle("w1", product).await.unwrap();
        assert!(!toggled.wishlisted);
        assert!(wishlist.list("w1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order_and_clear() {
        let wishlist = WishlistService::new(InMemoryWishlistStorage::new());
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        wishlist.toggle("w1", a).await.unwrap();
        wishlist.toggle("w1", b).await.unwrap();

        assert_eq!(wishlist.list("w1").await.unwrap(), vec![a, b]);
        wishlist.clear("w1").await.unwrap();
        assert!(!wishlist.contains("w1", &a).await.unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_toggles_of_different_products() {
        let wishlist = std::sync::Arc::new(WishlistService::new(InMemoryWishlistStorage::new()));
        let products: Vec<Uuid> = (0..10).map(|_| Uuid::new_v4()).collect();

        let tasks: Vec<_> = products
            .iter()
            .map(|product| {
                let wishlist = wishlist.clone();
                let product = *product;
                tokio::spawn(async move { wishlist.toggle("w1", product).await })
            })
            .collect();
        for task in tasks {
            assert!(task.await.unwrap().unwrap().wishlisted);
        }

        assert_eq!(wishlist.list("w1").await.unwrap().len(), 10);
    }
}
