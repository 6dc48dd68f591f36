//! The launcher's fixed endpoints answer the same bodies whatever the child
//! is doing.

use std::sync::Arc;

use axum::{body::Body, http::{Request, StatusCode}, Router};
use ragdesk_launcher::router::{build_router, LauncherState};
use ragdesk_launcher::supervisor::{ChildState, ChildStatus};
use serde_json::{json, Value};
use tokio::sync::watch;
use tower::ServiceExt;

fn app_with_child(state: ChildState) -> Router {
    let (_tx, rx) = watch::channel(ChildStatus { state, restarts: 0, started_at: None });
    build_router(LauncherState { ui_url: Arc::from("http://localhost:8501"), child: rx })
}

async fn get_json(app: &Router, path: &str) -> (StatusCode, Value) {
    let resp = app
        .clone()
        .oneshot(Request::get(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn root_and_ui_url_are_fixed_regardless_of_child() {
    let states = [
        ChildState::Starting,
        ChildState::Running { pid: Some(4242) },
        ChildState::Exited { code: Some(1) },
        ChildState::Failed { reason: "No such file or directory".to_string() },
    ];
    for state in states {
        let app = app_with_child(state);

        let (status, body) = get_json(&app, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "message": "FastAPI is running. Streamlit is available at /streamlit" })
        );

        let (status, body) = get_json(&app, "/streamlit").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "streamlit_url": "http://localhost:8501" }));
    }
}

#[tokio::test]
async fn child_endpoint_reports_recorded_state() {
    let app = app_with_child(ChildState::Running { pid: Some(77) });
    let (status, body) = get_json(&app, "/child").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "running");
    assert_eq!(body["pid"], 77);
    assert_eq!(body["restarts"], 0);
}
