//! ragdesk launcher
//!
//! Starts the UI server as a child process, then serves the status endpoints.
//! Run with: cargo run -p ragdesk-launcher

use std::path::PathBuf;
use std::sync::Arc;

use ragdesk_config::{Config, UI_BIND_ENV};
use ragdesk_launcher::router::{build_router, LauncherState};
use ragdesk_launcher::supervisor::{ChildSpec, RestartSettings, Supervisor};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Name of the UI binary built by the ragdesk-web crate.
const UI_BINARY: &str = "ragdesk-ui";

/// Without an explicit `launcher.ui_command`, prefer the UI binary installed
/// next to this executable and fall back to a PATH lookup.
fn resolve_ui_command(config: &Config) -> PathBuf {
    if let Some(cmd) = &config.launcher.ui_command {
        return cmd.clone();
    }
    let file_name = format!("{}{}", UI_BINARY, std::env::consts::EXE_SUFFIX);
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(&file_name)))
        .filter(|candidate| candidate.exists())
        .unwrap_or_else(|| PathBuf::from(file_name))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ragdesk=debug,info")),
        )
        .init();

    info!("Starting ragdesk launcher...");

    let config = Config::load()?;

    let spec = ChildSpec {
        program: resolve_ui_command(&config),
        args: config.launcher.ui_args.clone(),
        env: vec![(UI_BIND_ENV.to_string(), config.ui.bind.clone())],
    };
    let restart = RestartSettings {
        policy: config.launcher.restart,
        max_restarts: config.launcher.max_restarts,
        delay: config.launcher.restart_delay(),
    };
    info!("UI child: {} (restart policy {:?})", spec.program.display(), restart.policy);
    let supervisor = Supervisor::new(spec, restart).spawn();

    let state = LauncherState {
        ui_url: Arc::from(config.launcher.public_ui_url.as_str()),
        child: supervisor.subscribe(),
    };
    let app = build_router(state);

    let addr = config.launcher_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Launcher listening on http://{}", addr);
    info!("   Status:  http://{}/", addr);
    info!("   UI URL:  http://{}/streamlit", addr);
    info!("   Child:   http://{}/child", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    let last = supervisor.shutdown().await;
    info!("Launcher stopped; UI child state: {:?}", last.state);

    Ok(())
}
