//! Axum route handlers for the Export API.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;

use crate::document::{
    export, template_meta, DocumentKind, ExportFormat, TemplateId, TemplateMeta,
};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub text: String,
    pub kind: DocumentKind,
    pub template: TemplateId,
    pub format: ExportFormat,
}

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<Vec<TemplateMeta>> {
    Json(TemplateId::ALL.into_iter().map(template_meta).collect())
}

/// POST /api/v1/export
///
/// Renders the text into the requested format and returns it as an attachment.
pub async fn handle_export(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> Result<Response, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    // CPU-bound serialization, keep it off the async executor.
    let geometry = state.page_geometry;
    let exported = tokio::task::spawn_blocking(move || {
        export(
            &request.text,
            request.kind,
            request.template,
            request.format,
            &geometry,
        )
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in export: {e}")))??;

    let headers = [
        (header::CONTENT_TYPE, exported.content_type.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", exported.file_name),
        ),
    ];
    Ok((headers, Bytes::from(exported.bytes)).into_response())
}
