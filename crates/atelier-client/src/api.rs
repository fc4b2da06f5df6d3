use async_trait::async_trait;
use uuid::Uuid;

use atelier_types::{
    BuildOutcome, ChatMessage, CommitInfo, NewTask, OpenErrors, ProjectFile, ProjectInit,
    ProjectStats, PushFile, Repo, RepoSpec, Task, TaskPatch,
};

use crate::error::Result;
use crate::streaming::ChatStream;

/// Backend operations consumed by the workspace flows.
///
/// `AtelierClient` is the production implementation; tests drive the flows
/// against a scripted mock. The full client surface is wider than this
/// trait, which carries only what the flows and store need.
#[async_trait]
pub trait WorkspaceApi: Send + Sync {
    /// Initialize or adopt the default project.
    async fn init_project(&self) -> Result<ProjectInit>;

    /// Ordered chat history for a project.
    async fn chat_history(&self, project_id: Uuid) -> Result<Vec<ChatMessage>>;

    /// Open the streaming chat response for a user message.
    async fn stream_chat(&self, project_id: Uuid, content: &str) -> Result<ChatStream>;

    async fn list_tasks(&self, project_id: Uuid) -> Result<Vec<Task>>;
    async fn create_task(&self, task: &NewTask) -> Result<Task>;
    async fn update_task(&self, task_id: Uuid, patch: &TaskPatch) -> Result<Task>;
    async fn delete_task(&self, task_id: Uuid) -> Result<()>;

    async fn list_files(&self, project_id: Uuid) -> Result<Vec<ProjectFile>>;

    async fn project_stats(&self, project_id: Uuid) -> Result<ProjectStats>;

    async fn open_errors(&self, project_id: Uuid) -> Result<OpenErrors>;
    async fn resolve_error(&self, error_id: Uuid) -> Result<()>;

    /// Trigger a server-side preview build.
    async fn build_preview(&self, project_id: Uuid) -> Result<BuildOutcome>;

    /// URL the built preview is served from.
    fn preview_url(&self, project_id: Uuid) -> String;

    async fn create_repo(&self, spec: &RepoSpec) -> Result<Repo>;
    async fn push_files(
        &self,
        owner: &str,
        repo: &str,
        files: &[PushFile],
        branch: &str,
        update_existing: bool,
    ) -> Result<Vec<CommitInfo>>;
}
