//! Middleware module
//!
//! Request-level middleware applied to the whole router

pub mod logging;
