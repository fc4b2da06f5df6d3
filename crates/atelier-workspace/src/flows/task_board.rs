use std::sync::Arc;

use atelier_client::WorkspaceApi;
use atelier_types::{NewTask, TaskPatch, TaskStatus};
use uuid::Uuid;

use crate::store::{NoticeLevel, Resource, WorkspaceStore};

/// Kanban-board mutations over the task list.
///
/// Moves, renames and deletes apply optimistically: the store changes
/// first, the request follows, and a failed request rolls the store back
/// to the captured pre-image with a single error notice.
pub struct TaskBoard {
    api: Arc<dyn WorkspaceApi>,
    store: WorkspaceStore,
}

impl TaskBoard {
    pub fn new(api: Arc<dyn WorkspaceApi>, store: WorkspaceStore) -> Self {
        Self { api, store }
    }

    /// Move a task to another status column.
    ///
    /// Dropping a task on its current column is a no-op with zero requests.
    pub async fn move_task(&self, task_id: Uuid, target: TaskStatus) {
        let Some(current) = self.store.task(task_id) else {
            return;
        };
        if current.status == target {
            return;
        }

        let patch = TaskPatch::status(target);
        let Some(previous) = self.store.update_task(task_id, &patch) else {
            return;
        };

        match self.api.update_task(task_id, &patch).await {
            Ok(confirmed) => {
                self.store.replace_task(confirmed);
            }
            Err(e) => {
                tracing::warn!(%task_id, error = %e, "task move rejected");
                self.store.replace_task(previous);
                self.store
                    .push_notice(NoticeLevel::Error, "Failed to move task");
            }
        }
    }

    pub async fn rename_task(&self, task_id: Uuid, title: &str) {
        let patch = TaskPatch::title(title);
        let Some(previous) = self.store.update_task(task_id, &patch) else {
            return;
        };

        match self.api.update_task(task_id, &patch).await {
            Ok(confirmed) => {
                self.store.replace_task(confirmed);
            }
            Err(e) => {
                tracing::warn!(%task_id, error = %e, "task rename rejected");
                self.store.replace_task(previous);
                self.store
                    .push_notice(NoticeLevel::Error, "Failed to rename task");
            }
        }
    }

    /// Delete optimistically; on failure the task reappears at its old
    /// position.
    pub async fn delete_task(&self, task_id: Uuid) {
        let Some((index, previous)) = self.store.remove_task(task_id) else {
            return;
        };

        if let Err(e) = self.api.delete_task(task_id).await {
            tracing::warn!(%task_id, error = %e, "task delete rejected");
            self.store.insert_task(index, previous);
            self.store
                .push_notice(NoticeLevel::Error, "Failed to delete task");
        }
    }

    /// Create a task server-side, then reload the list so ordering matches
    /// the backend.
    pub async fn create_task(&self, task: NewTask) {
        if let Err(e) = self.api.create_task(&task).await {
            tracing::warn!(error = %e, "task create failed");
            self.store
                .push_notice(NoticeLevel::Error, "Failed to create task");
            return;
        }

        let ticket = self.store.begin_reload(Resource::Tasks);
        match self.api.list_tasks(task.project_id).await {
            Ok(tasks) => {
                self.store.complete_tasks_reload(ticket, tasks);
            }
            Err(e) => {
                tracing::warn!(error = %e, "task reload failed");
                self.store
                    .push_notice(NoticeLevel::Error, "Failed to refresh tasks");
            }
        }
    }
}
