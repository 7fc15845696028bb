pub mod health;
pub mod index;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(index::index_handler))
        .route("/health", get(health::health_handler))
        // Upload form (multipart)
        .route("/upload_resume", post(handlers::handle_upload_resume))
        // Analysis API
        .route("/api/v1/analyze", post(handlers::handle_analyze_text))
        .route("/api/v1/results/:id", get(handlers::handle_get_result))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
