//! Service layer module
//!
//! Contains the Gemini and Cloudinary clients and the prompt builders

pub mod cloudinary;
pub mod gemini;
pub mod prompts;

pub use cloudinary::CloudinaryClient;
pub use gemini::GeminiClient;
