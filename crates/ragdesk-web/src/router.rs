//! Axum router — maps all URL paths to handlers.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{
    compression::CompressionLayer,
    trace::TraceLayer,
};
use std::sync::Arc;
use crate::state::{AppState, SharedState};
use crate::handlers::{
    assets::main_css,
    health::health,
    initialize::initialize_submit,
    page::index,
    query::query_submit,
};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.ui.max_upload_bytes;
    let shared: SharedState = Arc::new(state);

    Router::new()
        // Pages
        .route("/",           get(index))
        .route("/initialize", post(initialize_submit))
        .route("/query",      post(query_submit))

        // Probes and assets
        .route("/health",          get(health))
        .route("/static/main.css", get(main_css))

        // Middleware
        .layer(DefaultBodyLimit::max(upload_limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
