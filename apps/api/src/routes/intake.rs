//! Axum route handler for source-file intake.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct IntakeResponse {
    pub text: String,
}

/// POST /api/v1/intake
///
/// Accepts a multipart upload with a `file` field (.txt or .docx) and returns its text.
pub async fn handle_intake(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<IntakeResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?;

        // Decompression and XML parsing are CPU-bound.
        let extractors = state.extractors.clone();
        let text = tokio::task::spawn_blocking(move || extractors.extract(&file_name, &data))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in intake: {e}")))??;
        return Ok(Json(IntakeResponse { text }));
    }

    Err(AppError::Validation("No file uploaded".to_string()))
}
