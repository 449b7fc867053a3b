//! In-memory image host for development and tests

use super::{HostedImage, ImageHost, ImageHostError, InlineImage};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Keeps uploaded images in memory and records every destroy call
///
/// Clones share state, so a test can keep a handle while the server owns another.
#[derive(Clone, Default)]
pub struct InMemoryImageHost {
    images: Arc<RwLock<HashMap<String, InlineImage>>>,
    destroyed: Arc<RwLock<Vec<String>>>,
    fail_uploads: Arc<AtomicBool>,
}

impl InMemoryImageHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following upload fail (simulates a host outage)
    pub fn fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    pub async fn contains(&self, public_id: &str) -> bool {
        self.images.read().await.contains_key(public_id)
    }

    pub async fn stored_count(&self) -> usize {
        self.images.read().await.len()
    }

    /// Public ids passed to `destroy`, in call order
    pub async fn destroyed(&self) -> Vec<String> {
        self.destroyed.read().await.clone()
    }
}

#[async_trait]
impl ImageHost for InMemoryImageHost {
    async fn upload(&self, payload: &str, folder: &str) -> Result<HostedImage, ImageHostError> {
        let image = InlineImage::parse(payload)?;

        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(ImageHostError::UploadFailed(
                "image host unavailable".to_string(),
            ));
        }

        let public_id = format!("{}/{}", folder, Uuid::new_v4().simple());
        let url = format!("memory://images/{}", public_id);
        self.images.write().await.insert(public_id.clone(), image);

        Ok(HostedImage { url, public_id })
    }

    async fn destroy(&self, public_id: &str) -> Result<(), ImageHostError> {
        self.destroyed.write().await.push(public_id.to_string());
        self.images.write().await.remove(public_id);
        Ok(())
    }
}
