//! Diagnostic prompt endpoint
//!
//! Forwards arbitrary text plus an image to the model with no output
//! schema, for trying prompts out by hand

use crate::handlers::AppState;
use crate::models::bill::PromptResponse;
use crate::models::gemini::{Content, GenerateContentRequest, Part};
use crate::utils::error::{AppError, AppResult};
use axum::extract::{Multipart, State};
use axum::Json;
use std::sync::Arc;
use tracing::debug;

/// Forward a free-form prompt and image to the model
///
/// POST /test/test_prompt
pub async fn test_prompt(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> AppResult<Json<PromptResponse>> {
    let mut prompt_txt: Option<String> = None;
    let mut image: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {}", e)))?
    {
        if field.file_name().is_some() {
            let mime_type = field.content_type().unwrap_or("image/jpeg").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read image data: {}", e)))?;
            image = Some((mime_type, data.to_vec()));
        } else if field.name() == Some("prompt_txt") {
            let text = field
                .text()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read prompt text: {}", e)))?;
            prompt_txt = Some(text);
        }
    }

    let prompt_txt = prompt_txt
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Missing prompt_txt".to_string()))?;
    let (mime_type, data) =
        image.ok_or_else(|| AppError::Validation("Missing prompt_img".to_string()))?;

    debug!("Forwarding test prompt ({} chars)", prompt_txt.len());

    let request = GenerateContentRequest {
        contents: vec![Content::user(vec![
            Part::inline_data(mime_type, &data),
            Part::text(prompt_txt),
        ])],
        generation_config: None,
    };

    let text = state
        .gemini
        .generate_content(request)
        .await
        .map_err(|e| AppError::ExternalApi(format!("Gemini error: {:#}", e)))?;

    Ok(Json(PromptResponse { response: text }))
}
