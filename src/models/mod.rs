//! Data models module
//!
//! Defines request and response data structures for callers and the Gemini API

pub mod bill;
pub mod gemini;
