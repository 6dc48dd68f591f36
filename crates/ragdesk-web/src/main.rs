//! ragdesk UI server
//!
//! Run with: cargo run -p ragdesk-web --bin ragdesk-ui

use std::sync::Arc;
use ragdesk_client::HttpRagBackend;
use ragdesk_config::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ragdesk=debug,info")),
        )
        .init();

    info!("Starting ragdesk UI server...");

    let config = Config::load()?;
    info!("Backend: {}", config.backend.base_url);
    match config.backend.timeout() {
        Some(t) => info!("Backend timeout: {:?}", t),
        None => info!("Backend timeout: none"),
    }

    tokio::fs::create_dir_all(&config.ui.upload_dir).await?;
    info!("Staging uploads in {}", config.ui.upload_dir.display());

    let backend = Arc::new(HttpRagBackend::new(&config.backend)?);
    let state = ragdesk_web::state::AppState::new(backend, config.ui.clone())?;
    let app = ragdesk_web::router::build_router(state);

    let addr = config.ui_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("UI listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down UI server");
        })
        .await?;

    Ok(())
}
