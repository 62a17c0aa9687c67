//! Bill endpoints
//!
//! Adapts uploaded bill images and bill time-series text into Gemini
//! structured-output calls

use crate::handlers::AppState;
use crate::models::bill::{AnalyticsRequest, PromptResponse};
use crate::models::gemini::{Content, GenerateContentRequest, GenerationConfig, Part};
use crate::services::prompts;
use crate::utils::error::{AppError, AppResult};
use crate::utils::logging::create_generate_log_summary;
use axum::extract::{Multipart, State};
use axum::Json;
use std::sync::Arc;
use tracing::{debug, warn};

/// Substitute payload when the model's analytics reply is not valid JSON
const ANALYTICS_FALLBACK: &str = "{\"summary\":\"We could not summarize this spending history right now.\",\"suggestion\":\"Please try again in a little while, or add more bill records first.\"}";

/// One uploaded image with its submitted content type
pub(crate) struct ImagePart {
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// Collect the file parts of a multipart payload, in submission order
pub(crate) async fn collect_images(mut multipart: Multipart) -> AppResult<Vec<ImagePart>> {
    let mut images = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {}", e)))?
    {
        if field.file_name().is_none() {
            continue;
        }

        let mime_type = field.content_type().unwrap_or("image/jpeg").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read image data: {}", e)))?;

        images.push(ImagePart {
            mime_type,
            data: data.to_vec(),
        });
    }

    Ok(images)
}

/// Summarize a single uploaded bill image
///
/// POST /bill/bill_reading
///
/// The model's JSON text is returned verbatim in the response envelope.
pub async fn bill_reading(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> AppResult<Json<PromptResponse>> {
    let mut images = collect_images(multipart).await?;
    if images.is_empty() {
        return Err(AppError::Validation("Missing bill image".to_string()));
    }

    // This endpoint reads a single bill; only the first file part counts
    let image = images.remove(0);
    let parts = vec![
        Part::inline_data(image.mime_type, &image.data),
        Part::text(prompts::bill_reading_prompt()),
    ];

    let text = generate_bill_summary(&state, parts).await?;
    Ok(Json(PromptResponse { response: text }))
}

/// Summarize an ordered batch of images forming one bill
///
/// POST /bill/bill_reading_v2
///
/// Page coherence checking is delegated to the model through the prompt;
/// no local cross-verification happens.
pub async fn bill_reading_v2(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> AppResult<Json<PromptResponse>> {
    let images = collect_images(multipart).await?;
    if images.is_empty() {
        return Err(AppError::Validation("Missing bill images".to_string()));
    }

    let mut parts: Vec<Part> = images
        .iter()
        .map(|image| Part::inline_data(image.mime_type.clone(), &image.data))
        .collect();
    parts.push(Part::text(prompts::bill_reading_batch_prompt(images.len())));

    let text = generate_bill_summary(&state, parts).await?;
    Ok(Json(PromptResponse { response: text }))
}

/// Shared bill-reading call with the BillResponse schema attached
async fn generate_bill_summary(state: &AppState, parts: Vec<Part>) -> AppResult<String> {
    let request = GenerateContentRequest {
        contents: vec![Content::user(parts)],
        generation_config: Some(GenerationConfig::json_with_schema(
            prompts::bill_response_schema(),
        )),
    };

    if let Ok(summary) = serde_json::to_string_pretty(&create_generate_log_summary(&request)) {
        debug!("Gemini bill-reading request:\n{}", summary);
    }

    state
        .gemini
        .generate_content(request)
        .await
        .map_err(|e| AppError::ExternalApi(format!("Gemini error: {:#}", e)))
}

/// Summarize a bill time series
///
/// POST /bill/analytics
pub async fn analytics(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyticsRequest>,
) -> AppResult<Json<PromptResponse>> {
    if request.time_series_data.trim().is_empty() {
        return Err(AppError::Validation(
            "time_series_data cannot be empty".to_string(),
        ));
    }

    let gemini_request = GenerateContentRequest {
        contents: vec![Content::user(vec![Part::text(prompts::analytics_prompt(
            &request.time_series_data,
        ))])],
        generation_config: Some(GenerationConfig::json_with_schema(
            prompts::time_series_schema(),
        )),
    };

    if let Ok(summary) = serde_json::to_string_pretty(&create_generate_log_summary(&gemini_request)) {
        debug!("Gemini analytics request:\n{}", summary);
    }

    let text = state
        .gemini
        .generate_content(gemini_request)
        .await
        .map_err(|e| AppError::ExternalApi(format!("Gemini error: {:#}", e)))?;

    Ok(Json(PromptResponse {
        response: ensure_valid_json(text),
    }))
}

/// Round-trip parse check on the model's reply
///
/// Schema-constrained output is still best-effort; callers always get
/// well-formed JSON, falling back to the canned payload if needed.
fn ensure_valid_json(text: String) -> String {
    if serde_json::from_str::<serde_json::Value>(&text).is_ok() {
        text
    } else {
        warn!("Gemini returned malformed JSON, substituting fallback: {}", text);
        ANALYTICS_FALLBACK.to_string()
    }
}
