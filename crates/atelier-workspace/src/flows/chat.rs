use std::sync::{Arc, Mutex};

use atelier_client::{StreamHandle, WorkspaceApi};
use atelier_types::ChatMessage;
use futures::StreamExt;
use uuid::Uuid;

use crate::store::{NoticeLevel, Resource, WorkspaceStore};

/// Shown in place of the assistant response when streaming fails.
pub const CHAT_FAILURE_TEXT: &str =
    "Sorry, I ran into a problem generating that response. Please try again.";

/// Drives a user message through the streaming chat endpoint and keeps the
/// store's transcript current while fragments arrive.
pub struct ChatFlow {
    api: Arc<dyn WorkspaceApi>,
    store: WorkspaceStore,
    active: Mutex<Option<StreamHandle>>,
}

impl ChatFlow {
    pub fn new(api: Arc<dyn WorkspaceApi>, store: WorkspaceStore) -> Self {
        Self {
            api,
            store,
            active: Mutex::new(None),
        }
    }

    /// Send a user message and stream the assistant response into the store.
    ///
    /// The user message and an empty assistant placeholder are appended
    /// before the request is issued; the placeholder's content is replaced
    /// with the accumulated text on every fragment. On any failure the
    /// placeholder is set to [`CHAT_FAILURE_TEXT`] and a single error notice
    /// is raised. Resolves once the stream ends either way.
    pub async fn send(&self, content: &str) {
        let Some(project_id) = self.store.project_id() else {
            self.store
                .push_notice(NoticeLevel::Error, "No active project");
            return;
        };

        self.store.add_message(ChatMessage::user(project_id, content));
        let placeholder = ChatMessage::assistant_placeholder(project_id);
        let assistant_id = placeholder.id;
        self.store.add_message(placeholder);
        self.store.set_chat_busy(true);

        let outcome = self.stream_into(project_id, assistant_id, content).await;

        self.clear_active();
        self.store.set_chat_busy(false);

        match outcome {
            Ok(()) => self.refresh_after_response(project_id).await,
            Err(e) => {
                tracing::warn!(error = %e, "chat stream failed");
                self.store.update_message_content(assistant_id, CHAT_FAILURE_TEXT);
                self.store
                    .push_notice(NoticeLevel::Error, "Chat response failed");
            }
        }
    }

    async fn stream_into(
        &self,
        project_id: Uuid,
        assistant_id: Uuid,
        content: &str,
    ) -> atelier_client::Result<()> {
        let mut stream = self.api.stream_chat(project_id, content).await?;
        self.set_active(stream.handle());

        let mut accumulated = String::new();
        while let Some(fragment) = stream.next().await {
            accumulated.push_str(&fragment?);
            self.store.update_message_content(assistant_id, &accumulated);
        }
        Ok(())
    }

    /// Agent responses may have created tasks or written files; reload both
    /// lists and the stats counters. Reloads that race a local mutation are
    /// discarded by the store.
    async fn refresh_after_response(&self, project_id: Uuid) {
        let task_ticket = self.store.begin_reload(Resource::Tasks);
        let file_ticket = self.store.begin_reload(Resource::Files);

        let mut failed = false;
        match self.api.list_tasks(project_id).await {
            Ok(tasks) => {
                self.store.complete_tasks_reload(task_ticket, tasks);
            }
            Err(e) => {
                tracing::warn!(error = %e, "task reload failed");
                failed = true;
            }
        }
        match self.api.list_files(project_id).await {
            Ok(files) => {
                self.store.complete_files_reload(file_ticket, files);
            }
            Err(e) => {
                tracing::warn!(error = %e, "file reload failed");
                failed = true;
            }
        }
        match self.api.project_stats(project_id).await {
            Ok(stats) => self.store.set_stats(stats),
            Err(e) => {
                tracing::warn!(error = %e, "stats reload failed");
                failed = true;
            }
        }

        if failed {
            self.store
                .push_notice(NoticeLevel::Error, "Failed to refresh workspace");
        }
    }

    /// Abort the in-flight response stream, if any. The pending `send`
    /// resolves normally with whatever text had arrived.
    pub fn cancel(&self) {
        let handle = self
            .active
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(handle) = handle {
            handle.cancel();
        }
    }

    fn set_active(&self, handle: StreamHandle) {
        *self.active.lock().unwrap_or_else(|e| e.into_inner()) = Some(handle);
    }

    fn clear_active(&self) {
        self.active.lock().unwrap_or_else(|e| e.into_inner()).take();
    }

    /// Load the persisted transcript, replacing any local messages.
    pub async fn load_history(&self) {
        let Some(project_id) = self.store.project_id() else {
            return;
        };
        let ticket = self.store.begin_reload(Resource::Messages);
        match self.api.chat_history(project_id).await {
            Ok(messages) => {
                self.store.complete_messages_reload(ticket, messages);
            }
            Err(e) => {
                tracing::warn!(error = %e, "chat history load failed");
                self.store
                    .push_notice(NoticeLevel::Error, "Failed to load chat history");
            }
        }
    }
}
