pub mod export;
pub mod health;
pub mod intake;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/templates", get(export::handle_list_templates))
        .route("/api/v1/export", post(export::handle_export))
        .route("/api/v1/intake", post(intake::handle_intake))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
