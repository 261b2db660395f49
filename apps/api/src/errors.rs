use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::document::ExportError;
use crate::intake::IntakeError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Intake(#[from] IntakeError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Intake(e) => match e {
                IntakeError::UnsupportedSourceFormat(_) => (
                    StatusCode::BAD_REQUEST,
                    "UNSUPPORTED_FILE_TYPE",
                    e.to_string(),
                ),
                IntakeError::EmptyExtraction => {
                    (StatusCode::BAD_REQUEST, "EMPTY_EXTRACTION", e.to_string())
                }
                IntakeError::Malformed(detail) => {
                    tracing::warn!("Malformed upload: {detail}");
                    (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        "MALFORMED_FILE",
                        "Failed to parse the resume file".to_string(),
                    )
                }
                IntakeError::UnavailableCapability(format) => {
                    tracing::error!("No extractor registered for {format}");
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "CAPABILITY_UNAVAILABLE",
                        e.to_string(),
                    )
                }
            },
            AppError::Export(e) => {
                tracing::error!("Export error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXPORT_FAILED",
                    "The document could not be generated".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
