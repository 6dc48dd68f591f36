//! Launcher HTTP surface. `/` and `/streamlit` answer fixed bodies and never
//! look at the child; `/child` reports what the supervisor last recorded.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;

use crate::supervisor::ChildStatus;

pub const ROOT_MESSAGE: &str = "FastAPI is running. Streamlit is available at /streamlit";

#[derive(Clone)]
pub struct LauncherState {
    /// Reported verbatim by `GET /streamlit`
    pub ui_url: Arc<str>,
    pub child: watch::Receiver<ChildStatus>,
}

#[derive(Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct UiUrlResponse {
    pub streamlit_url: String,
}

pub fn build_router(state: LauncherState) -> Router {
    Router::new()
        .route("/",          get(root))
        .route("/streamlit", get(ui_url))
        .route("/child",     get(child_status))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> Json<RootResponse> {
    Json(RootResponse { message: ROOT_MESSAGE })
}

async fn ui_url(State(state): State<LauncherState>) -> Json<UiUrlResponse> {
    Json(UiUrlResponse { streamlit_url: state.ui_url.to_string() })
}

async fn child_status(State(state): State<LauncherState>) -> Json<ChildStatus> {
    let status = state.child.borrow().clone();
    Json(status)
}
