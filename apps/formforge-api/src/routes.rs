//! Router construction

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderName,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{self, SKIPPED_HEADER};
use crate::state::AppState;

/// Room for multipart boundaries and part headers on top of the file itself
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn router(state: Arc<AppState>) -> Router {
    // CORS configuration for the browser editor
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([HeaderName::from_static(SKIPPED_HEADER)]);

    let upload_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD;
    let body_limit = state.config.max_body_bytes;

    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Upload and inspection
        .route(
            "/api/pdf/upload",
            post(handlers::upload_pdf).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/pdf/inspect", post(handlers::inspect_pdf))
        // Generation
        .route(
            "/api/pdf/generate-from-layout",
            post(handlers::generate_from_layout),
        )
        .route(
            "/api/pdf/generate-from-existing",
            post(handlers::generate_from_existing),
        )
        .route("/api/pdf/save-layout", post(handlers::save_layout))
        // Add middleware
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
