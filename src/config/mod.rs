//! Configuration management module
//!
//! Responsible for loading and validating application configuration from the environment

pub mod settings;

pub use settings::Settings;
