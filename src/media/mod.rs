//! Image hosting collaborator
//!
//! Receipt images and product/category pictures arrive inline as base64 and
//! are handed to an external host. The host returns a public URL plus a public
//! id, which is all the storefront keeps; the public id is later used to
//! destroy the image when its owner is deleted.

pub mod cloudinary;
pub mod in_memory;

pub use cloudinary::CloudinaryImageHost;
pub use in_memory::InMemoryImageHost;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// An image stored on the external host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostedImage {
    pub url: String,
    pub public_id: String,
}

/// An image reference in a request body: either already hosted or inline base64
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageInput {
    Hosted(HostedImage),
    Inline(String),
}

/// Errors reported by an image host
#[derive(Debug, thiserror::Error)]
pub enum ImageHostError {
    #[error("Invalid image payload: {0}")]
    InvalidPayload(String),

    #[error("Image upload failed: {0}")]
    UploadFailed(String),

    #[error("Image deletion failed for '{public_id}': {message}")]
    DestroyFailed { public_id: String, message: String },

    #[error("Image host request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// External image host (upload / destroy by public id)
#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Upload an inline base64 image (plain or `data:` URI) into `folder`
    async fn upload(&self, payload: &str, folder: &str) -> Result<HostedImage, ImageHostError>;

    /// Remove a previously uploaded image
    async fn destroy(&self, public_id: &str) -> Result<(), ImageHostError>;
}

/// An inline image split into its media type and decoded bytes
#[derive(Debug, Clone, PartialEq)]
pub struct InlineImage {
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl InlineImage {
    /// Parse `data:<type>;base64,<data>` or bare base64 (assumed JPEG)
    pub fn parse(payload: &str) -> Result<Self, ImageHostError> {
        let payload = payload.trim();
        if payload.is_empty() {
            return Err(ImageHostError::InvalidPayload("empty image".to_string()));
        }

        let (media_type, data) = match payload.strip_prefix("data:") {
            Some(rest) => {
                let (header, data) = rest.split_once(',').ok_or_else(|| {
                    ImageHostError::InvalidPayload("data URI without payload".to_string())
                })?;
                let media_type = header.strip_suffix(";base64").ok_or_else(|| {
                    ImageHostError::InvalidPayload("data URI is not base64 encoded".to_string())
                })?;
                if !media_type.starts_with("image/") {
                    return Err(ImageHostError::InvalidPayload(format!(
                        "unsupported media type '{}'",
                        media_type
                    )));
                }
                (media_type.to_string(), data)
            }
            None => ("image/jpeg".to_string(), payload),
        };

        let bytes = STANDARD
            .decode(data)
            .map_err(|e| ImageHostError::InvalidPayload(e.to_string()))?;

        Ok(Self { media_type, bytes })
    }

    /// Re-encode as a data URI, the form image hosts accept as a `file` field
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.media_type, STANDARD.encode(&self.bytes))
    }
}

/// Image inputs after upload, with the images uploaded by this call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedImages {
    pub images: Vec<HostedImage>,
    pub uploaded: Vec<HostedImage>,
}

/// Resolve a list of image inputs, uploading the inline ones
///
/// If an upload fails, images uploaded earlier in the same call are destroyed
/// before the error is returned.
pub async fn resolve_images(
    host: &dyn ImageHost,
    inputs: Vec<ImageInput>,
    folder: &str,
) -> Result<ResolvedImages, ImageHostError> {
    let mut resolved = ResolvedImages::default();
    for input in inputs {
        match input {
            ImageInput::Hosted(image) => resolved.images.push(image),
            ImageInput::Inline(payload) => match host.upload(&payload, folder).await {
                Ok(image) => {
                    resolved.uploaded.push(image.clone());
                    resolved.images.push(image);
                }
                Err(e) => {
                    destroy_quietly(host, &resolved.uploaded).await;
                    return Err(e);
                }
            },
        }
    }
    Ok(resolved)
}

/// Destroy images, logging failures instead of propagating them
pub async fn destroy_quietly(host: &dyn ImageHost, images: &[HostedImage]) {
    for image in images {
        match host.destroy(&image.public_id).await {
            Ok(()) => tracing::info!(public_id = %image.public_id, "hosted image destroyed"),
            Err(e) => {
                tracing::warn!(public_id = %image.public_id, error = %e, "failed to destroy hosted image")
            }
        }
    }
}
