//! Media storage endpoints
//!
//! Upload-credential signing and asset deletion against the storage
//! provider; the file bytes themselves never pass through this service

use crate::handlers::AppState;
use crate::models::bill::{
    DeleteRequest, DeleteResponse, UploadSignatureRequest, UploadSignatureResponse,
};
use crate::utils::error::{AppError, AppResult};
use axum::extract::State;
use axum::Json;
use std::sync::Arc;
use tracing::info;

/// Trimmed value of an optional field, with empty treated as missing
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Issue a signed upload credential
///
/// POST /upload-signature
///
/// Validation happens before any signing work so a bad request never
/// touches the secret.
pub async fn upload_signature(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UploadSignatureRequest>,
) -> AppResult<Json<UploadSignatureResponse>> {
    let (user_id, filename) = match (non_empty(request.user_id), non_empty(request.filename)) {
        (Some(user_id), Some(filename)) => (user_id, filename),
        _ => {
            return Err(AppError::Validation(
                "Missing userId or filename".to_string(),
            ))
        }
    };

    let credential = state.cloudinary.sign_upload(&user_id, &filename);
    info!("Issued upload credential for folder {}", credential.folder);

    Ok(Json(credential))
}

/// Delete a previously uploaded asset
///
/// DELETE /delete-cloudinary
///
/// Deletion is fire-and-forget against the provider's store; no local
/// record is kept.
pub async fn delete_image(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DeleteRequest>,
) -> AppResult<Json<DeleteResponse>> {
    let public_id = non_empty(request.public_id)
        .ok_or_else(|| AppError::Validation("Missing publicId".to_string()))?;

    let result = state
        .cloudinary
        .destroy(&public_id)
        .await
        .map_err(|e| AppError::ExternalApi(format!("Cloudinary error: {:#}", e)))?;

    let outcome = result
        .get("result")
        .and_then(|value| value.as_str())
        .unwrap_or("unknown");

    if outcome != "ok" {
        return Err(AppError::ExternalApi(format!(
            "Failed to delete image: provider reported '{}'",
            outcome
        )));
    }

    info!("Deleted asset {}", public_id);

    Ok(Json(DeleteResponse {
        success: true,
        result,
    }))
}
