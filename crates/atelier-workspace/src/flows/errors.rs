use std::sync::Arc;
use std::time::Duration;

use atelier_client::WorkspaceApi;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::store::{NoticeLevel, WorkspaceStore};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Fetch the open-error list once and fold it into the store.
///
/// Polling failures are transient by nature; they are logged and the
/// previous error state is kept, without raising a notice.
pub async fn poll_once(api: &dyn WorkspaceApi, store: &WorkspaceStore, project_id: Uuid) {
    match api.open_errors(project_id).await {
        Ok(open) => store.set_open_errors(open),
        Err(e) => tracing::debug!(%project_id, error = %e, "error poll failed"),
    }
}

/// Background task polling the open-error endpoint at a fixed interval.
///
/// The first fetch happens immediately on spawn. The task is aborted by
/// [`ErrorWatcher::stop`] or when the watcher is dropped.
pub struct ErrorWatcher {
    api: Arc<dyn WorkspaceApi>,
    store: WorkspaceStore,
    project_id: Uuid,
    task: JoinHandle<()>,
}

impl ErrorWatcher {
    pub fn spawn(api: Arc<dyn WorkspaceApi>, store: WorkspaceStore, project_id: Uuid) -> Self {
        Self::spawn_with_interval(api, store, project_id, DEFAULT_POLL_INTERVAL)
    }

    pub fn spawn_with_interval(
        api: Arc<dyn WorkspaceApi>,
        store: WorkspaceStore,
        project_id: Uuid,
        interval: Duration,
    ) -> Self {
        let task = {
            let api = Arc::clone(&api);
            let store = store.clone();
            tokio::spawn(async move {
                let mut ticker = tokio::time::interval(interval);
                loop {
                    // First tick completes immediately.
                    ticker.tick().await;
                    poll_once(api.as_ref(), &store, project_id).await;
                }
            })
        };
        Self {
            api,
            store,
            project_id,
            task,
        }
    }

    /// Resolve an error server-side, then refresh the list right away so
    /// the panel does not wait out the poll interval.
    pub async fn resolve(&self, error_id: Uuid) {
        if let Err(e) = self.api.resolve_error(error_id).await {
            tracing::warn!(%error_id, error = %e, "error resolve failed");
            self.store
                .push_notice(NoticeLevel::Error, "Failed to resolve error");
            return;
        }
        poll_once(self.api.as_ref(), &self.store, self.project_id).await;
    }

    pub fn stop(&self) {
        self.task.abort();
    }
}

impl Drop for ErrorWatcher {
    fn drop(&mut self) {
        self.task.abort();
    }
}
