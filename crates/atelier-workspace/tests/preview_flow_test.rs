mod common;

use std::sync::Arc;

use atelier_client::WorkspaceApi;
use atelier_types::BuildOutcome;
use atelier_workspace::flows::preview::PreviewFlow;

use common::MockApi;

#[tokio::test]
async fn successful_build_yields_the_preview_url() {
    let api = Arc::new(MockApi::new());
    let flow = PreviewFlow::new(Arc::clone(&api) as Arc<dyn WorkspaceApi>);

    let state = flow.build(api.project_id).await;

    assert_eq!(
        state.url.as_deref(),
        Some(format!("http://localhost:8000/preview/{}", api.project_id).as_str())
    );
    assert!(state.error.is_none());
    assert_eq!(state.logs, ["build ok"]);
}

#[tokio::test]
async fn failed_build_carries_logs_and_error() {
    let api = Arc::new(MockApi::new());
    *api.build.lock().unwrap() = BuildOutcome {
        success: false,
        logs: vec!["npm install".to_string(), "error TS2304".to_string()],
        error: Some("type check failed".to_string()),
    };
    let flow = PreviewFlow::new(Arc::clone(&api) as Arc<dyn WorkspaceApi>);

    let state = flow.build(api.project_id).await;

    assert!(state.url.is_none());
    assert_eq!(state.error.as_deref(), Some("type check failed"));
    assert_eq!(state.logs.len(), 2);
}

#[tokio::test]
async fn failed_build_without_message_gets_a_generic_error() {
    let api = Arc::new(MockApi::new());
    *api.build.lock().unwrap() = BuildOutcome {
        success: false,
        logs: Vec::new(),
        error: None,
    };
    let flow = PreviewFlow::new(Arc::clone(&api) as Arc<dyn WorkspaceApi>);

    let state = flow.build(api.project_id).await;
    assert_eq!(state.error.as_deref(), Some("Build failed"));
}

#[tokio::test]
async fn request_failure_surfaces_as_build_error() {
    let api = Arc::new(MockApi::new());
    api.fail("build_preview");
    let flow = PreviewFlow::new(Arc::clone(&api) as Arc<dyn WorkspaceApi>);

    let state = flow.build(api.project_id).await;

    assert!(state.url.is_none());
    assert!(state.error.unwrap().starts_with("Build request failed"));
    assert!(state.logs.is_empty());
}
