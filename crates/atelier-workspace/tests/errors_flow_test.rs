mod common;

use std::sync::Arc;
use std::time::Duration;

use atelier_client::WorkspaceApi;
use atelier_types::{ErrorDetail, ErrorKind, ErrorSummary, OpenErrors};
use atelier_workspace::flows::errors::{poll_once, ErrorWatcher};
use atelier_workspace::store::WorkspaceStore;
use chrono::Utc;
use uuid::Uuid;

use common::MockApi;

fn one_error(project_id: Uuid) -> OpenErrors {
    OpenErrors {
        errors: vec![ErrorDetail {
            id: Uuid::new_v4(),
            project_id,
            kind: ErrorKind::Runtime,
            message: "NameError: x is not defined".to_string(),
            file_path: Some("app/main.py".to_string()),
            line_number: Some(12),
            code_snippet: None,
            stack_trace: None,
            resolved: false,
            created_at: Utc::now(),
            resolved_at: None,
        }],
        summary: ErrorSummary {
            total: 1,
            open: 1,
            runtime: 1,
            ..ErrorSummary::default()
        },
    }
}

#[tokio::test]
async fn poll_folds_errors_into_the_store() {
    let api = MockApi::new();
    let store = WorkspaceStore::new();
    *api.errors.lock().unwrap() = one_error(api.project_id);

    poll_once(&api, &store, api.project_id).await;

    let open = store.open_errors();
    assert_eq!(open.errors.len(), 1);
    assert!(store.error_panel_expanded());
}

#[tokio::test]
async fn poll_failure_keeps_previous_state_and_raises_no_notice() {
    let api = MockApi::new();
    let store = WorkspaceStore::new();
    *api.errors.lock().unwrap() = one_error(api.project_id);
    poll_once(&api, &store, api.project_id).await;

    api.fail("open_errors");
    poll_once(&api, &store, api.project_id).await;

    assert_eq!(store.open_errors().errors.len(), 1);
    assert!(store.take_notices().is_empty());
}

#[tokio::test(start_paused = true)]
async fn watcher_polls_immediately_and_then_on_the_interval() {
    let api = Arc::new(MockApi::new());
    let store = WorkspaceStore::new();
    let watcher = ErrorWatcher::spawn_with_interval(
        Arc::clone(&api) as Arc<dyn WorkspaceApi>,
        store.clone(),
        api.project_id,
        Duration::from_secs(10),
    );

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(api.calls_of("open_errors"), 1);

    tokio::time::sleep(Duration::from_secs(25)).await;
    assert_eq!(api.calls_of("open_errors"), 3);

    watcher.stop();
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(api.calls_of("open_errors"), 3);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_watcher_stops_polling() {
    let api = Arc::new(MockApi::new());
    let store = WorkspaceStore::new();
    {
        let _watcher = ErrorWatcher::spawn_with_interval(
            Arc::clone(&api) as Arc<dyn WorkspaceApi>,
            store.clone(),
            api.project_id,
            Duration::from_secs(10),
        );
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    let after_drop = api.calls_of("open_errors");
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(api.calls_of("open_errors"), after_drop);
}

#[tokio::test]
async fn resolve_refreshes_the_error_list_immediately() {
    let api = Arc::new(MockApi::new());
    let store = WorkspaceStore::new();
    let open = one_error(api.project_id);
    let error_id = open.errors[0].id;
    *api.errors.lock().unwrap() = open;

    let watcher = ErrorWatcher::spawn_with_interval(
        Arc::clone(&api) as Arc<dyn WorkspaceApi>,
        store.clone(),
        api.project_id,
        Duration::from_secs(3600),
    );
    // Let the initial poll land.
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(store.open_errors().errors.len(), 1);

    watcher.resolve(error_id).await;

    assert_eq!(api.calls_of("resolve_error"), 1);
    assert!(store.open_errors().errors.is_empty());
    watcher.stop();
}

#[tokio::test]
async fn failed_resolve_raises_a_notice() {
    let api = Arc::new(MockApi::new());
    let store = WorkspaceStore::new();
    api.fail("resolve_error");

    let watcher = ErrorWatcher::spawn_with_interval(
        Arc::clone(&api) as Arc<dyn WorkspaceApi>,
        store.clone(),
        api.project_id,
        Duration::from_secs(3600),
    );
    watcher.resolve(Uuid::new_v4()).await;

    assert_eq!(store.take_notices().len(), 1);
    watcher.stop();
}
