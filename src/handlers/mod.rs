//! HTTP handlers module
//!
//! Contains all HTTP endpoint handling logic

pub mod bills;
pub mod health;
pub mod media;
pub mod test;

use crate::config::Settings;
use crate::middleware::logging::request_logging_middleware;
use crate::services::{CloudinaryClient, GeminiClient};
use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{delete, get, post};
use axum::Router;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Settings,
    pub gemini: GeminiClient,
    pub cloudinary: CloudinaryClient,
}

/// Create application router
pub async fn create_router(settings: Settings) -> Result<Router> {
    // Create provider clients
    let gemini = GeminiClient::new(settings.gemini.clone())?;
    let cloudinary = CloudinaryClient::new(settings.cloudinary.clone())?;

    // Create application state
    let app_state = Arc::new(AppState {
        settings: settings.clone(),
        gemini,
        cloudinary,
    });

    // Create middleware stack
    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(&settings));

    // Create routes
    let router = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .route("/bill/bill_reading", post(bills::bill_reading))
        .route("/bill/bill_reading_v2", post(bills::bill_reading_v2))
        .route("/bill/analytics", post(bills::analytics))
        .route("/test/test_prompt", post(test::test_prompt))
        .route("/upload-signature", post(media::upload_signature))
        .route("/delete-cloudinary", delete(media::delete_image))
        .layer(axum::middleware::from_fn(request_logging_middleware))
        .layer(DefaultBodyLimit::max(settings.request.max_request_size))
        .with_state(app_state)
        .layer(middleware_stack);

    Ok(router)
}

/// Build the CORS layer from the configured origins
fn build_cors_layer(settings: &Settings) -> CorsLayer {
    if !settings.security.cors_enabled {
        return CorsLayer::new();
    }

    if settings
        .security
        .allowed_origins
        .iter()
        .any(|origin| origin == "*")
    {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = settings
            .security
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
