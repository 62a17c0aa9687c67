//! Bill Gateway Library
//!
//! Adapts bill images and bill time-series text into Gemini
//! structured-output calls, and signs/deletes Cloudinary assets

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

// Re-export common types
pub use config::Settings;
pub use handlers::{create_router, AppState};
pub use models::{bill, gemini};
pub use services::{CloudinaryClient, GeminiClient};
pub use utils::error::{AppError, AppResult};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
