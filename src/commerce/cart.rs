//! Shopping cart service over injected storage

use crate::commerce::pricing::round2;
use crate::core::error::{StoreError, StoreResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use validator::Validate;

/// One cart line; lines are identified by product id, size and color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[validate(length(min = 1, message = "id is required"))]
    pub id: String,
    pub name: String,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,
    #[validate(range(min = 1, max = 999, message = "quantity must be between 1 and 999"))]
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl CartItem {
    fn same_line(&self, id: &str, size: Option<&str>, color: Option<&str>) -> bool {
        self.id == id && self.size.as_deref() == size && self.color.as_deref() == color
    }
}

/// Identifies a cart line in update and remove calls
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineKey {
    pub id: String,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub items: Vec<CartItem>,
    pub item_count: u32,
    pub subtotal: f64,
}

/// Where carts live, keyed by an opaque cart id
#[async_trait]
pub trait CartStorage: Send + Sync {
    async fn load(&self, cart_id: &str) -> anyhow::Result<Vec<CartItem>>;

    async fn save(&self, cart_id: &str, items: Vec<CartItem>) -> anyhow::Result<()>;
}

#[async_trait]
impl<S: CartStorage + ?Sized> CartStorage for Arc<S> {
    async fn load(&self, cart_id: &str) -> anyhow::Result<Vec<CartItem>> {
        (**self).load(cart_id).await
    }

    async fn save(&self, cart_id: &str, items: Vec<CartItem>) -> anyhow::Result<()> {
        (**self).save(cart_id, items).await
    }
}

/// Process-local cart storage
#[derive(Clone, Default)]
pub struct InMemoryCartStorage {
    carts: Arc<RwLock<HashMap<String, Vec<CartItem>>>>,
}

impl InMemoryCartStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartStorage for InMemoryCartStorage {
    async fn load(&self, cart_id: &str) -> anyhow::Result<Vec<CartItem>> {
        Ok(self
            .carts
            .read()
            .await
            .get(cart_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn save(&self, cart_id: &str, items: Vec<CartItem>) -> anyhow::Result<()> {
        let mut carts = self.carts.write().await;
        if items.is_empty() {
            carts.remove(cart_id);
        } else {
            carts.insert(cart_id.to_string(), items);
        }
        Ok(())
    }
}

/// Largest quantity a single cart line may hold
pub const MAX_LINE_QUANTITY: u32 = 999;

pub struct CartService<S: CartStorage> {
    storage: S,
    /// Serializes read-modify-write cycles so concurrent edits are not lost
    writes: Mutex<()>,
}

impl<S: CartStorage> CartService<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            writes: Mutex::new(()),
        }
    }

    pub async fn summary(&self, cart_id: &str) -> StoreResult<CartSummary> {
        let items = self.storage.load(cart_id).await?;
        Ok(summarize(items))
    }

    /// Add a line, merging with an identical id/size/color line
    pub async fn add(&self, cart_id: &str, item: CartItem) -> StoreResult<CartSummary> {
        check_quantity(item.quantity)?;
        if !item.price.is_finite() || item.price < 0.0 {
            return Err(StoreError::field("price", "price must not be negative"));
        }

        let _guard = self.writes.lock().await;
        let mut items = self.storage.load(cart_id).await?;
        match items
            .iter_mut()
            .find(|line| line.same_line(&item.id, item.size.as_deref(), item.color.as_deref()))
        {
            Some(line) => {
                let merged = line
                    .quantity
                    .checked_add(item.quantity)
                    .unwrap_or(u32::MAX);
                check_quantity(merged)?;
                line.quantity = merged;
                line.price = item.price;
            }
            None => items.push(item),
        }

        self.storage.save(cart_id, items.clone()).await?;
        Ok(summarize(items))
    }

    /// Set a line's quantity; zero removes the line
    pub async fn set_quantity(
        &self,
        cart_id: &str,
        key: &LineKey,
        quantity: u32,
    ) -> StoreResult<CartSummary> {
        if quantity == 0 {
            return self.remove(cart_id, key).await;
        }
        check_quantity(quantity)?;

        let _guard = self.writes.lock().await;
        let mut items = self.storage.load(cart_id).await?;
        let line = items
            .iter_mut()
            .find(|line| line.same_line(&key.id, key.size.as_deref(), key.color.as_deref()))
            .ok_or_else(|| StoreError::not_found("cart item", &key.id))?;
        line.quantity = quantity;

        self.storage.save(cart_id, items.clone()).await?;
        Ok(summarize(items))
    }

    pub async fn remove(&self, cart_id: &str, key: &LineKey) -> StoreResult<CartSummary> {
        let _guard = self.writes.lock().await;
        let mut items = self.storage.load(cart_id).await?;
        items.retain(|line| !line.same_line(&key.id, key.size.as_deref(), key.color.as_deref()));

        self.storage.save(cart_id, items.clone()).await?;
        Ok(summarize(items))
    }

    pub async fn clear(&self, cart_id: &str) -> StoreResult<()> {
        let _guard = self.writes.lock().await;
        self.storage.save(cart_id, Vec::new()).await?;
        Ok(())
    }
}

fn check_quantity(quantity: u32) -> StoreResult<()> {
    if quantity == 0 || quantity > MAX_LINE_QUANTITY {
        return Err(StoreError::field(
            "quantity",
            format!("quantity must be between 1 and {}", MAX_LINE_QUANTITY),
        ));
    }
    Ok(())
}

fn summarize(items: Vec<CartItem>) -> CartSummary {
    let item_count = items
        .iter()
        .fold(0u32, |count, i| count.saturating_add(i.quantity));
    let subtotal = round2(items.iter().map(|i| i.price * i.quantity as f64).sum());
    CartSummary {
        items,
        item_count,
        subtotal,
    }
}
