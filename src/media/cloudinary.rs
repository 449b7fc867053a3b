//! Cloudinary upload API client
//!
//! Uses the signed upload/destroy endpoints:
//! `POST https://api.cloudinary.com/v1_1/{cloud}/image/upload` and
//! `POST https://api.cloudinary.com/v1_1/{cloud}/image/destroy`.

use super::{HostedImage, ImageHost, ImageHostError, InlineImage};
use async_trait::async_trait;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

const DEFAULT_API_BASE: &str = "https://api.cloudinary.com/v1_1";

/// Credentials for a Cloudinary account
#[derive(Debug, Clone)]
pub struct CloudinaryCredentials {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

/// Image host backed by Cloudinary
#[derive(Clone)]
pub struct CloudinaryImageHost {
    client: reqwest::Client,
    credentials: CloudinaryCredentials,
    api_base: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorMessage,
}

#[derive(Debug, Deserialize)]
struct ApiErrorMessage {
    message: String,
}

impl CloudinaryImageHost {
    pub fn new(credentials: CloudinaryCredentials) -> Self {
        Self {
            client: reqwest::Client::new(),
            credentials,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Point the client at another API base (a proxy or a local stub)
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "{}/{}/image/{}",
            self.api_base, self.credentials.cloud_name, action
        )
    }

    /// Build the signed form: the given params plus api_key, signature and algorithm
    fn signed_form(&self, params: BTreeMap<&'static str, String>) -> Vec<(&'static str, String)> {
        let signature = sign(&params, &self.credentials.api_secret);

        let mut form: Vec<(&'static str, String)> = params.into_iter().collect();
        form.push(("api_key", self.credentials.api_key.clone()));
        form.push(("signature", signature));
        form.push(("signature_algorithm", "sha256".to_string()));
        form
    }

    async fn api_error(response: reqwest::Response) -> String {
        let status = response.status();
        match response.json::<ApiErrorBody>().await {
            Ok(body) => body.error.message,
            Err(_) => format!("HTTP {}", status),
        }
    }
}

/// Cloudinary request signature: `sha256("k1=v1&k2=v2" + secret)`, params sorted by key
fn sign(params: &BTreeMap<&'static str, String>, api_secret: &str) -> String {
    let to_sign = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

fn timestamp() -> String {
    chrono::Utc::now().timestamp().to_string()
}

#[async_trait]
impl ImageHost for CloudinaryImageHost {
    async fn upload(&self, payload: &str, folder: &str) -> Result<HostedImage, ImageHostError> {
        let image = InlineImage::parse(payload)?;

        let mut params = BTreeMap::new();
        params.insert("folder", folder.to_string());
        params.insert("timestamp", timestamp());

        let mut form = self.signed_form(params);
        form.push(("file", image.to_data_uri()));

        let response = self
            .client
            .post(self.endpoint("upload"))
            .form(&form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ImageHostError::UploadFailed(
                Self::api_error(response).await,
            ));
        }

        let body: UploadResponse = response.json().await?;
        tracing::debug!(public_id = %body.public_id, "image uploaded to cloudinary");

        Ok(HostedImage {
            url: body.secure_url,
            public_id: body.public_id,
        })
    }

    async fn destroy(&self, public_id: &str) -> Result<(), ImageHostError> {
        let mut params = BTreeMap::new();
        params.insert("public_id", public_id.to_string());
        params.insert("timestamp", timestamp());

        let response = self
            .client
            .post(self.endpoint("destroy"))
            .form(&self.signed_form(params))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ImageHostError::DestroyFailed {
                public_id: public_id.to_string(),
                message: Self::api_error(response).await,
            });
        }

        // "not found" means the image is already gone
        let body: DestroyResponse = response.json().await?;
        match body.result.as_str() {
            "ok" | "not found" => Ok(()),
            other => Err(ImageHostError::DestroyFailed {
                public_id: public_id.to_string(),
                message: other.to_string(),
            }),
        }
    }
}
