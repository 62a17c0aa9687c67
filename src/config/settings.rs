//! Application configuration settings
//!
//! Defines all configuration structures and loading logic

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server configuration
    pub server: ServerConfig,
    /// Gemini API configuration
    pub gemini: GeminiConfig,
    /// Cloudinary account configuration
    pub cloudinary: CloudinaryConfig,
    /// Request configuration
    pub request: RequestConfig,
    /// Security configuration
    pub security: SecurityConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen host
    pub host: String,
    /// Listen port
    pub port: u16,
}

/// Gemini API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key
    pub api_key: String,
    /// API base URL
    pub base_url: String,
    /// Model used for every generation request
    pub model: String,
    /// Request timeout in seconds
    pub timeout: u64,
}

/// Cloudinary account configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudinaryConfig {
    /// Cloud (account) name
    pub cloud_name: String,
    /// Public API key
    pub api_key: String,
    /// Private signing secret, never sent to callers
    pub api_secret: String,
    /// Admin API base URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout: u64,
}

/// Request configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Maximum request body size in bytes
    pub max_request_size: usize,
}

/// Security configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Allowed origins for CORS
    pub allowed_origins: Vec<String>,
    /// Whether CORS is enabled
    pub cors_enabled: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (text/json)
    pub format: String,
}

impl Settings {
    /// Create a new configuration instance
    pub fn new() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        let settings = Self {
            server: ServerConfig {
                host: get_env_or_default("SERVER_HOST", "0.0.0.0"),
                port: get_env_or_default("SERVER_PORT", "8081")
                    .parse()
                    .context("Invalid port number")?,
            },
            gemini: GeminiConfig {
                api_key: std::env::var("GEMINI_API_KEY")
                    .context("GEMINI_API_KEY environment variable not set")?,
                base_url: get_env_or_default(
                    "GEMINI_BASE_URL",
                    "https://generativelanguage.googleapis.com/v1beta",
                ),
                model: get_env_or_default("GEMINI_MODEL", "gemini-2.5-flash"),
                timeout: get_env_or_default("GEMINI_TIMEOUT", "60")
                    .parse()
                    .context("Invalid Gemini timeout value")?,
            },
            cloudinary: CloudinaryConfig {
                cloud_name: std::env::var("CLOUD_NAME")
                    .context("CLOUD_NAME environment variable not set")?,
                api_key: std::env::var("API_KEY")
                    .context("API_KEY environment variable not set")?,
                api_secret: std::env::var("API_SECRET")
                    .context("API_SECRET environment variable not set")?,
                base_url: get_env_or_default("CLOUDINARY_BASE_URL", "https://api.cloudinary.com/v1_1"),
                timeout: get_env_or_default("CLOUDINARY_TIMEOUT", "30")
                    .parse()
                    .context("Invalid Cloudinary timeout value")?,
            },
            request: RequestConfig {
                max_request_size: get_env_or_default("MAX_REQUEST_SIZE", "10485760")
                    .parse()
                    .context("Invalid maximum request size")?,
            },
            security: SecurityConfig {
                allowed_origins: get_env_or_default("ALLOWED_ORIGINS", "*")
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .collect(),
                cors_enabled: get_env_or_default("CORS_ENABLED", "true")
                    .parse()
                    .context("Invalid CORS enabled flag")?,
            },
            logging: LoggingConfig {
                level: get_env_or_default("RUST_LOG", "info"),
                format: get_env_or_default("LOG_FORMAT", "text"),
            },
        };

        // Validate configuration
        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration validity
    pub fn validate(&self) -> Result<()> {
        // Validate port range
        if self.server.port == 0 {
            anyhow::bail!("Port number cannot be 0");
        }

        // Validate API credentials
        if self.gemini.api_key.is_empty() {
            anyhow::bail!("Gemini API key cannot be empty");
        }

        if self.gemini.api_key.contains(char::is_whitespace) {
            anyhow::bail!("Gemini API key cannot contain whitespace characters");
        }

        if self.cloudinary.cloud_name.is_empty()
            || self.cloudinary.api_key.is_empty()
            || self.cloudinary.api_secret.is_empty()
        {
            anyhow::bail!("Cloudinary cloud name, API key and API secret must all be set");
        }

        if self.cloudinary.api_secret.contains(char::is_whitespace) {
            anyhow::bail!("Cloudinary API secret cannot contain whitespace characters");
        }

        // Validate URL formats
        if !self.gemini.base_url.starts_with("http") {
            anyhow::bail!("Invalid Gemini base URL format, should start with 'http'");
        }

        if !self.cloudinary.base_url.starts_with("http") {
            anyhow::bail!("Invalid Cloudinary base URL format, should start with 'http'");
        }

        // Validate model name
        if self.gemini.model.is_empty() {
            anyhow::bail!("Gemini model name cannot be empty");
        }

        // Validate timeout values
        if self.gemini.timeout == 0 || self.cloudinary.timeout == 0 {
            anyhow::bail!("Timeout values cannot be 0");
        }

        // Validate request size limit
        if self.request.max_request_size == 0 {
            anyhow::bail!("Maximum request size cannot be 0");
        }

        // Validate log level
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            anyhow::bail!("Invalid log level: {}", self.logging.level);
        }

        // Validate log format
        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        Ok(())
    }
}

/// Get environment variable or default value
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
