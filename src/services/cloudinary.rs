//! Cloudinary client service
//!
//! Request signing for direct uploads and asset deletion against the
//! Cloudinary admin API

use crate::config::settings::CloudinaryConfig;
use crate::models::bill::UploadSignatureResponse;
use anyhow::{Context, Result};
use chrono::Utc;
use reqwest::Client;
use sha1::{Digest, Sha1};
use std::time::Duration;
use tracing::{debug, error};

/// Compute a Cloudinary API request signature
///
/// Parameters with empty values are dropped, the rest are sorted by key
/// and serialized as `key=value` pairs joined by `&`; the hex SHA-1 of
/// that string with the API secret appended is the signature.
pub fn api_sign_request(params: &[(&str, String)], api_secret: &str) -> String {
    let mut pairs: Vec<(&str, &str)> = params
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| (*key, value.as_str()))
        .collect();
    pairs.sort_by_key(|(key, _)| *key);

    let to_sign = pairs
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha1::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// Cloudinary API client
#[derive(Debug, Clone)]
pub struct CloudinaryClient {
    client: Client,
    config: CloudinaryConfig,
}

impl CloudinaryClient {
    /// Create a new client instance
    pub fn new(config: CloudinaryConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(concat!("billgateway/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    /// Build the destroy request URL
    fn destroy_url(&self) -> String {
        let base_url = self.config.base_url.trim_end_matches('/');
        format!("{}/{}/image/destroy", base_url, self.config.cloud_name)
    }

    /// Produce a signed upload credential for a direct browser upload
    ///
    /// The file bytes never pass through this service; the caller uploads
    /// straight to the provider with these parameters. Expiry of the
    /// timestamp is enforced by the provider.
    pub fn sign_upload(&self, user_id: &str, filename: &str) -> UploadSignatureResponse {
        self.sign_upload_at(user_id, filename, Utc::now().timestamp())
    }

    /// Signing body of [`sign_upload`], deterministic over the timestamp
    pub fn sign_upload_at(
        &self,
        user_id: &str,
        filename: &str,
        timestamp: i64,
    ) -> UploadSignatureResponse {
        let folder = format!("bills/{}", user_id);
        let public_id = filename.to_string();

        let signature = api_sign_request(
            &[
                ("timestamp", timestamp.to_string()),
                ("folder", folder.clone()),
                ("public_id", public_id.clone()),
            ],
            &self.config.api_secret,
        );

        debug!("Signed upload credential for folder {}", folder);

        UploadSignatureResponse {
            cloud_name: self.config.cloud_name.clone(),
            api_key: self.config.api_key.clone(),
            timestamp,
            folder,
            signature,
            public_id,
        }
    }

    /// Request deletion of an uploaded asset
    ///
    /// Returns the provider's own result object; the caller decides what
    /// counts as success.
    pub async fn destroy(&self, public_id: &str) -> Result<serde_json::Value> {
        debug!("Sending Cloudinary destroy request for {}", public_id);

        let timestamp = Utc::now().timestamp();
        let signature = api_sign_request(
            &[
                ("public_id", public_id.to_string()),
                ("timestamp", timestamp.to_string()),
            ],
            &self.config.api_secret,
        );

        let form = [
            ("public_id", public_id.to_string()),
            ("timestamp", timestamp.to_string()),
            ("api_key", self.config.api_key.clone()),
            ("signature", signature),
        ];

        let response = self
            .client
            .post(self.destroy_url())
            .form(&form)
            .send()
            .await
            .context("Failed to send destroy request")?;

        let status = response.status();

        if status.is_success() {
            let result: serde_json::Value = response
                .json()
                .await
                .context("Failed to parse destroy response")?;

            debug!("Cloudinary destroy completed: {}", result);
            Ok(result)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            error!("Cloudinary destroy request failed: {} - {}", status, error_text);
            anyhow::bail!("Cloudinary destroy request failed: {} - {}", status, error_text);
        }
    }
}
