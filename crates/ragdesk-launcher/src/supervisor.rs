//! Child process supervision for the UI server.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use ragdesk_config::RestartPolicy;
use serde::Serialize;
use tokio::process::Command;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// What to run.
#[derive(Debug, Clone)]
pub struct ChildSpec {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
}

/// When and how often to restart.
#[derive(Debug, Clone, Copy)]
pub struct RestartSettings {
    pub policy: RestartPolicy,
    pub max_restarts: u32,
    pub delay: Duration,
}

impl RestartSettings {
    fn should_restart(&self, failed: bool, restarts: u32) -> bool {
        match self.policy {
            RestartPolicy::Never => false,
            RestartPolicy::OnFailure => failed && restarts < self.max_restarts,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ChildState {
    Starting,
    Running { pid: Option<u32> },
    Exited { code: Option<i32> },
    Failed { reason: String },
    Stopped,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChildStatus {
    #[serde(flatten)]
    pub state: ChildState,
    pub restarts: u32,
    pub started_at: Option<DateTime<Utc>>,
}

impl ChildStatus {
    fn initial() -> Self {
        Self { state: ChildState::Starting, restarts: 0, started_at: None }
    }
}

pub struct Supervisor {
    spec: ChildSpec,
    restart: RestartSettings,
}

/// Handle to a running supervisor task.
pub struct SupervisorHandle {
    status: watch::Receiver<ChildStatus>,
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SupervisorHandle {
    /// Receiver for status changes, for handlers that outlive this handle's borrow.
    pub fn subscribe(&self) -> watch::Receiver<ChildStatus> {
        self.status.clone()
    }

    /// Wait until the supervisor gives up on its own (child exited and no
    /// restart is due).
    pub async fn wait(self) -> ChildStatus {
        // Dropping the shutdown sender reads as a shutdown request, so it must
        // outlive the task.
        let SupervisorHandle { status, shutdown: _shutdown, task } = self;
        if let Err(e) = task.await {
            error!("Supervisor task panicked: {}", e);
        }
        let last = status.borrow().clone();
        last
    }

    /// Kill the child if it is running and stop supervising.
    pub async fn shutdown(self) -> ChildStatus {
        let _ = self.shutdown.send(true);
        self.wait().await
    }
}

impl Supervisor {
    pub fn new(spec: ChildSpec, restart: RestartSettings) -> Self {
        Self { spec, restart }
    }

    pub fn spawn(self) -> SupervisorHandle {
        let (status_tx, status_rx) = watch::channel(ChildStatus::initial());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(self.run(status_tx, shutdown_rx));
        SupervisorHandle { status: status_rx, shutdown: shutdown_tx, task }
    }

    async fn run(self, status: watch::Sender<ChildStatus>, mut shutdown: watch::Receiver<bool>) {
        let mut restarts = 0u32;
        loop {
            let set = |state: ChildState, started_at: Option<DateTime<Utc>>| {
                status.send_modify(|s| {
                    s.state = state;
                    s.restarts = restarts;
                    if started_at.is_some() {
                        s.started_at = started_at;
                    }
                });
            };

            set(ChildState::Starting, None);
            info!("Spawning UI process: {}", self.spec.program.display());

            let spawned = Command::new(&self.spec.program)
                .args(&self.spec.args)
                .envs(self.spec.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
                .kill_on_drop(true)
                .spawn();

            let failed = match spawned {
                Err(e) => {
                    error!("Failed to spawn {}: {}", self.spec.program.display(), e);
                    set(ChildState::Failed { reason: e.to_string() }, None);
                    true
                }
                Ok(mut child) => {
                    let pid = child.id();
                    info!("UI process running (pid {:?})", pid);
                    set(ChildState::Running { pid }, Some(Utc::now()));

                    tokio::select! {
                        exit = child.wait() => match exit {
                            Ok(code) => {
                                if code.success() {
                                    info!("UI process exited cleanly");
                                } else {
                                    warn!("UI process exited with {}", code);
                                }
                                set(ChildState::Exited { code: code.code() }, None);
                                !code.success()
                            }
                            Err(e) => {
                                error!("Lost track of UI process: {}", e);
                                set(ChildState::Failed { reason: e.to_string() }, None);
                                true
                            }
                        },
                        _ = shutdown.changed() => {
                            info!("Stopping UI process");
                            if let Err(e) = child.kill().await {
                                warn!("Failed to kill UI process: {}", e);
                            }
                            set(ChildState::Stopped, None);
                            return;
                        }
                    }
                }
            };

            if !self.restart.should_restart(failed, restarts) {
                if failed && self.restart.policy == RestartPolicy::OnFailure {
                    warn!("UI process gave up after {} restart(s)", restarts);
                }
                return;
            }

            restarts += 1;
            warn!(
                "Restarting UI process in {:?} (attempt {}/{})",
                self.restart.delay, restarts, self.restart.max_restarts
            );
            tokio::select! {
                _ = tokio::time::sleep(self.restart.delay) => {}
                _ = shutdown.changed() => {
                    status.send_modify(|s| s.state = ChildState::Stopped);
                    return;
                }
            }
        }
    }
}
