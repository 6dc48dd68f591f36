//! Stylesheet compiled into the binary, so the UI runs from any directory.

use axum::http::header;
use axum::response::IntoResponse;

pub const MAIN_CSS: &str = include_str!("../../static/main.css");

pub async fn main_css() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], MAIN_CSS)
}
