//! Page rendering. One minijinja template, auto-escaped, so backend text and
//! user input never reach the page as markup.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use minijinja::Environment;
use ragdesk_common::QueryResult;
use serde::Serialize;

const PAGE_TEMPLATE: &str = "page.html";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Warning,
    Error,
}

/// A banner shown above the form that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: Level,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self { level: Level::Success, text: text.into() }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self { level: Level::Warning, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { level: Level::Error, text: text.into() }
    }
}

/// Everything one render of the page needs.
#[derive(Debug, Default, Serialize)]
pub struct PageView<'a> {
    pub backend_url: &'a str,
    /// Banners for the initialize form in the sidebar
    pub sidebar_notices: Vec<Notice>,
    /// Banners for the query form in the main panel
    pub query_notices: Vec<Notice>,
    /// Echoed back into the textarea
    pub question: &'a str,
    pub result: Option<QueryResult>,
}

pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(PAGE_TEMPLATE, include_str!("../templates/page.html"))?;
        Ok(Self { env })
    }

    pub fn render(&self, view: &PageView<'_>) -> Result<Html<String>, RenderError> {
        let html = self.env.get_template(PAGE_TEMPLATE)?.render(view)?;
        Ok(Html(html))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("template error: {0}")]
pub struct RenderError(#[from] minijinja::Error);

impl IntoResponse for RenderError {
    fn into_response(self) -> Response {
        tracing::error!("{}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, "failed to render page").into_response()
    }
}
