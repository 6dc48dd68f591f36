//! Supervisor lifecycle against real short-lived processes.
#![cfg(unix)]

use std::path::PathBuf;
use std::time::Duration;

use ragdesk_config::RestartPolicy;
use ragdesk_launcher::supervisor::{ChildSpec, ChildState, RestartSettings, Supervisor};

fn shell(script: &str) -> ChildSpec {
    ChildSpec {
        program: PathBuf::from("sh"),
        args: vec!["-c".to_string(), script.to_string()],
        env: Vec::new(),
    }
}

fn restart(policy: RestartPolicy, max_restarts: u32) -> RestartSettings {
    RestartSettings { policy, max_restarts, delay: Duration::from_millis(10) }
}

#[tokio::test]
async fn never_policy_spawns_once() {
    let handle = Supervisor::new(shell("exit 3"), restart(RestartPolicy::Never, 5)).spawn();
    let last = tokio::time::timeout(Duration::from_secs(10), handle.wait()).await.unwrap();
    assert_eq!(last.state, ChildState::Exited { code: Some(3) });
    assert_eq!(last.restarts, 0);
    assert!(last.started_at.is_some());
}

#[tokio::test]
async fn on_failure_restarts_up_to_limit() {
    let handle = Supervisor::new(shell("exit 1"), restart(RestartPolicy::OnFailure, 2)).spawn();
    let last = tokio::time::timeout(Duration::from_secs(10), handle.wait()).await.unwrap();
    assert_eq!(last.state, ChildState::Exited { code: Some(1) });
    assert_eq!(last.restarts, 2);
}

#[tokio::test]
async fn clean_exit_is_not_restarted() {
    let handle = Supervisor::new(shell("exit 0"), restart(RestartPolicy::OnFailure, 2)).spawn();
    let last = tokio::time::timeout(Duration::from_secs(10), handle.wait()).await.unwrap();
    assert_eq!(last.state, ChildState::Exited { code: Some(0) });
    assert_eq!(last.restarts, 0);
}

#[tokio::test]
async fn spawn_failure_is_recorded() {
    let spec = ChildSpec {
        program: PathBuf::from("/nonexistent/ragdesk-ui"),
        args: Vec::new(),
        env: Vec::new(),
    };
    let handle = Supervisor::new(spec, restart(RestartPolicy::OnFailure, 1)).spawn();
    let last = tokio::time::timeout(Duration::from_secs(10), handle.wait()).await.unwrap();
    assert!(matches!(last.state, ChildState::Failed { .. }));
    assert_eq!(last.restarts, 1);
}

#[tokio::test]
async fn shutdown_kills_running_child() {
    let handle = Supervisor::new(shell("sleep 30"), restart(RestartPolicy::OnFailure, 3)).spawn();

    let mut rx = handle.subscribe();
    tokio::time::timeout(Duration::from_secs(10), async {
        while !matches!(rx.borrow().state, ChildState::Running { .. }) {
            rx.changed().await.unwrap();
        }
    })
    .await
    .unwrap();

    let last = tokio::time::timeout(Duration::from_secs(10), handle.shutdown()).await.unwrap();
    assert_eq!(last.state, ChildState::Stopped);
    assert_eq!(last.restarts, 0);
}

#[tokio::test]
async fn child_sees_configured_environment() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("bind.txt");
    let spec = ChildSpec {
        program: PathBuf::from("sh"),
        args: vec!["-c".to_string(), format!("printf %s \"$RAGDESK_UI_BIND\" > {}", out.display())],
        env: vec![("RAGDESK_UI_BIND".to_string(), "0.0.0.0:8501".to_string())],
    };
    let handle = Supervisor::new(spec, restart(RestartPolicy::Never, 0)).spawn();
    tokio::time::timeout(Duration::from_secs(10), handle.wait()).await.unwrap();
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "0.0.0.0:8501");
}
