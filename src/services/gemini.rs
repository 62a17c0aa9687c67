//! Gemini client service
//!
//! Encapsulates HTTP communication with the Gemini `generateContent` API

use crate::config::settings::GeminiConfig;
use crate::models::gemini::{GeminiErrorResponse, GenerateContentRequest, GenerateContentResponse};
use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};

/// Gemini API client
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a new client instance
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(concat!("billgateway/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    /// Build the generateContent request URL
    fn build_url(&self) -> String {
        let base_url = self.config.base_url.trim_end_matches('/');
        format!("{}/models/{}:generateContent", base_url, self.config.model)
    }

    /// Send a generation request and return the model's raw text
    pub async fn generate_content(&self, request: GenerateContentRequest) -> Result<String> {
        debug!("Sending Gemini generateContent request");

        let url = self.build_url();

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();

        if status.is_success() {
            let body: GenerateContentResponse = response
                .json()
                .await
                .context("Failed to parse Gemini response")?;

            debug!("Gemini request completed successfully");

            body.first_text()
                .ok_or_else(|| anyhow::anyhow!("Gemini response contained no text candidates"))
        } else {
            let error_text = response.text().await.unwrap_or_default();

            // Prefer the structured error envelope when the body carries one
            if let Ok(error_response) = serde_json::from_str::<GeminiErrorResponse>(&error_text) {
                error!("Gemini API error: {}", error_response.error.message);
                anyhow::bail!("Gemini API error: {}", error_response.error.message);
            } else {
                error!("Gemini API request failed: {} - {}", status, error_text);
                anyhow::bail!("Gemini API request failed: {} - {}", status, error_text);
            }
        }
    }
}
