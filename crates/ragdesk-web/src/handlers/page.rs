//! Landing page — both forms, no results.

use axum::{extract::State, response::Html};
use crate::render::{PageView, RenderError};
use crate::state::SharedState;

pub async fn index(State(state): State<SharedState>) -> Result<Html<String>, RenderError> {
    state.pages.render(&PageView {
        backend_url: state.backend.base_url(),
        ..Default::default()
    })
}
