#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use atelier_client::{ChatStream, ClientError, Result, WorkspaceApi};
use atelier_types::{
    BuildOutcome, ChatMessage, CommitInfo, NewTask, OpenErrors, ProjectFile, ProjectInit,
    ProjectStats, PushFile, Repo, RepoSpec, Task, TaskPatch, TaskPriority, TaskStatus,
};
use chrono::Utc;
use futures::stream;
use uuid::Uuid;

/// Scripted behavior of the mocked chat endpoint.
pub enum ChatScript {
    /// Each entry is one stream fragment, or an error terminating the stream.
    Chunks(Vec<std::result::Result<String, String>>),
    /// Stream that never yields; only ends when cancelled.
    Pending,
}

/// Scripted in-memory backend. Operations named in `failing` return an
/// error; every call is recorded for request-count assertions.
pub struct MockApi {
    pub project_id: Uuid,
    pub tasks: Mutex<Vec<Task>>,
    pub files: Mutex<Vec<ProjectFile>>,
    pub messages: Mutex<Vec<ChatMessage>>,
    pub stats: Mutex<ProjectStats>,
    pub errors: Mutex<OpenErrors>,
    pub build: Mutex<BuildOutcome>,
    pub chat_script: Mutex<ChatScript>,
    failing: Mutex<HashSet<&'static str>>,
    calls: Mutex<Vec<&'static str>>,
}

impl Default for MockApi {
    fn default() -> Self {
        Self {
            project_id: Uuid::new_v4(),
            tasks: Mutex::new(Vec::new()),
            files: Mutex::new(Vec::new()),
            messages: Mutex::new(Vec::new()),
            stats: Mutex::new(ProjectStats::default()),
            errors: Mutex::new(OpenErrors::default()),
            build: Mutex::new(BuildOutcome {
                success: true,
                logs: vec!["build ok".to_string()],
                error: None,
            }),
            chat_script: Mutex::new(ChatScript::Chunks(Vec::new())),
            failing: Mutex::new(HashSet::new()),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&self, operation: &'static str) {
        self.failing.lock().unwrap().insert(operation);
    }

    pub fn succeed(&self, operation: &'static str) {
        self.failing.lock().unwrap().remove(operation);
    }

    pub fn calls_of(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| **c == operation)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn script_chat(&self, fragments: &[&str]) {
        *self.chat_script.lock().unwrap() = ChatScript::Chunks(
            fragments.iter().map(|f| Ok(f.to_string())).collect(),
        );
    }

    pub fn script_chat_failure(&self, fragments: &[&str], error: &str) {
        let mut chunks: Vec<std::result::Result<String, String>> =
            fragments.iter().map(|f| Ok(f.to_string())).collect();
        chunks.push(Err(error.to_string()));
        *self.chat_script.lock().unwrap() = ChatScript::Chunks(chunks);
    }

    pub fn script_chat_pending(&self) {
        *self.chat_script.lock().unwrap() = ChatScript::Pending;
    }

    fn check(&self, operation: &'static str) -> Result<()> {
        self.calls.lock().unwrap().push(operation);
        if self.failing.lock().unwrap().contains(operation) {
            Err(ClientError::Stream(format!("mock {operation} failure")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl WorkspaceApi for MockApi {
    async fn init_project(&self) -> Result<ProjectInit> {
        self.check("init_project")?;
        Ok(ProjectInit {
            project_id: self.project_id,
            title: "My App".to_string(),
            description: None,
            is_new: true,
        })
    }

    async fn chat_history(&self, _project_id: Uuid) -> Result<Vec<ChatMessage>> {
        self.check("chat_history")?;
        Ok(self.messages.lock().unwrap().clone())
    }

    async fn stream_chat(&self, _project_id: Uuid, _content: &str) -> Result<ChatStream> {
        self.check("stream_chat")?;
        let script = std::mem::replace(
            &mut *self.chat_script.lock().unwrap(),
            ChatScript::Chunks(Vec::new()),
        );
        let inner: atelier_client::TextStream = match script {
            ChatScript::Chunks(chunks) => {
                let items: Vec<Result<String>> = chunks
                    .into_iter()
                    .map(|c| c.map_err(ClientError::Stream))
                    .collect();
                Box::pin(stream::iter(items))
            }
            ChatScript::Pending => Box::pin(stream::pending()),
        };
        Ok(ChatStream::new(inner))
    }

    async fn list_tasks(&self, _project_id: Uuid) -> Result<Vec<Task>> {
        self.check("list_tasks")?;
        Ok(self.tasks.lock().unwrap().clone())
    }

    async fn create_task(&self, task: &NewTask) -> Result<Task> {
        self.check("create_task")?;
        let created = make_task(task.project_id, &task.title, TaskStatus::Todo);
        self.tasks.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_task(&self, task_id: Uuid, patch: &TaskPatch) -> Result<Task> {
        self.check("update_task")?;
        let mut tasks = self.tasks.lock().unwrap();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| ClientError::Stream("no such task".to_string()))?;
        patch.apply_to(task);
        Ok(task.clone())
    }

    async fn delete_task(&self, task_id: Uuid) -> Result<()> {
        self.check("delete_task")?;
        self.tasks.lock().unwrap().retain(|t| t.id != task_id);
        Ok(())
    }

    async fn list_files(&self, _project_id: Uuid) -> Result<Vec<ProjectFile>> {
        self.check("list_files")?;
        Ok(self.files.lock().unwrap().clone())
    }

    async fn project_stats(&self, _project_id: Uuid) -> Result<ProjectStats> {
        self.check("project_stats")?;
        Ok(*self.stats.lock().unwrap())
    }

    async fn open_errors(&self, _project_id: Uuid) -> Result<OpenErrors> {
        self.check("open_errors")?;
        Ok(self.errors.lock().unwrap().clone())
    }

    async fn resolve_error(&self, error_id: Uuid) -> Result<()> {
        self.check("resolve_error")?;
        self.errors
            .lock()
            .unwrap()
            .errors
            .retain(|e| e.id != error_id);
        Ok(())
    }

    async fn build_preview(&self, _project_id: Uuid) -> Result<BuildOutcome> {
        self.check("build_preview")?;
        Ok(self.build.lock().unwrap().clone())
    }

    fn preview_url(&self, project_id: Uuid) -> String {
        format!("http://localhost:8000/preview/{project_id}")
    }

    async fn create_repo(&self, spec: &RepoSpec) -> Result<Repo> {
        self.check("create_repo")?;
        Ok(make_repo("octocat", &spec.name))
    }

    async fn push_files(
        &self,
        _owner: &str,
        _repo: &str,
        files: &[PushFile],
        _branch: &str,
        _update_existing: bool,
    ) -> Result<Vec<CommitInfo>> {
        self.check("push_files")?;
        Ok(files
            .iter()
            .map(|f| CommitInfo {
                sha: format!("sha-{}", f.path),
                url: format!("https://api.github.com/commit/{}", f.path),
                html_url: format!("https://github.com/commit/{}", f.path),
            })
            .collect())
    }
}

pub fn make_task(project_id: Uuid, title: &str, status: TaskStatus) -> Task {
    let now = Utc::now();
    Task {
        id: Uuid::new_v4(),
        project_id,
        title: title.to_string(),
        description: None,
        status,
        priority: TaskPriority::Medium,
        order_index: 0,
        assigned_to: None,
        created_at: now,
        updated_at: now,
        completed_at: None,
    }
}

pub fn make_file(project_id: Uuid, path: &str) -> ProjectFile {
    let now = Utc::now();
    ProjectFile {
        id: Uuid::new_v4(),
        project_id,
        path: path.to_string(),
        content: String::new(),
        language: None,
        file_type: None,
        version: 1,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn make_repo(owner: &str, name: &str) -> Repo {
    Repo {
        id: 1,
        name: name.to_string(),
        full_name: format!("{owner}/{name}"),
        description: None,
        html_url: format!("https://github.com/{owner}/{name}"),
        clone_url: format!("https://github.com/{owner}/{name}.git"),
        ssh_url: format!("git@github.com:{owner}/{name}.git"),
        default_branch: "main".to_string(),
        private: false,
        created_at: "2025-01-01T00:00:00Z".to_string(),
        updated_at: "2025-01-01T00:00:00Z".to_string(),
        pushed_at: None,
    }
}
