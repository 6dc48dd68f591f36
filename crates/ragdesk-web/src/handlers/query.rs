//! Question form → backend `/query` → answer and sources.

use axum::{extract::State, response::Html, Form};
use serde::Deserialize;
use crate::actions;
use crate::render::{PageView, RenderError};
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct QueryForm {
    #[serde(default)]
    pub question: String,
}

pub async fn query_submit(
    State(state): State<SharedState>,
    Form(form): Form<QueryForm>,
) -> Result<Html<String>, RenderError> {
    let outcome = actions::query(&state, &form.question).await;

    state.pages.render(&PageView {
        backend_url: state.backend.base_url(),
        query_notices: outcome.notices,
        question: &form.question,
        result: outcome.result,
        ..Default::default()
    })
}
