//! Shared application state for the web server.

use std::sync::Arc;
use ragdesk_client::RagBackend;
use ragdesk_config::UiConfig;
use tokio::sync::Mutex;
use crate::render::PageRenderer;

/// Shared state injected into every Axum handler.
pub struct AppState {
    /// The RAG backend every action is forwarded to
    pub backend: Arc<dyn RagBackend>,
    pub ui: UiConfig,
    pub pages: PageRenderer,
    /// Held from staging to cleanup. Uploads share one directory and keep
    /// their original names, so two initialize actions must not interleave.
    pub initialize_lock: Mutex<()>,
}

impl AppState {
    pub fn new(backend: Arc<dyn RagBackend>, ui: UiConfig) -> anyhow::Result<Self> {
        Ok(Self { backend, ui, pages: PageRenderer::new()?, initialize_lock: Mutex::new(()) })
    }
}

pub type SharedState = Arc<AppState>;
