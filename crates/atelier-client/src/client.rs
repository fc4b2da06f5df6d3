use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use atelier_types::{
    BuildOutcome, ChatMessage, CommitInfo, ErrorReport, FilePatch, InstalledPackages, NewFile,
    NewProject, NewTask, OpenErrors, Project, ProjectFile, ProjectInit, ProjectPatch,
    ProjectStats, ProjectSummary, PushFile, RateLimit, Repo, RepoSpec, ScrapedDocs, Task,
    TaskPatch,
};

use crate::api::WorkspaceApi;
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::streaming::{decode_text_stream, ChatStream};

/// Typed client for the Atelier backend.
///
/// One instance per backend; cheap to clone, shares the connection pool.
#[derive(Debug, Clone)]
pub struct AtelierClient {
    http_client: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl AtelierClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut base_url = Url::parse(&config.base_url)?;
        // A trailing slash makes Url::join keep any path prefix of the base.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        // The configured timeout is applied per unary request, never on the
        // client: a client-level timeout would cap the whole body read and
        // cut off chat streams that are still producing fragments.
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("atelier/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(config.timeout())
            .build()?;

        Ok(Self {
            http_client,
            base_url,
            timeout: config.timeout(),
        })
    }

    /// Client against a base URL with default settings.
    pub fn from_url(base_url: &str) -> Result<Self> {
        Self::new(&ClientConfig::new(base_url))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ------------------------------------------------------------------
    // Projects
    // ------------------------------------------------------------------

    pub async fn list_projects(&self) -> Result<Vec<ProjectSummary>> {
        self.get("projects").await
    }

    pub async fn create_project(&self, project: &NewProject) -> Result<Project> {
        self.post("projects", project).await
    }

    pub async fn update_project(&self, project_id: Uuid, patch: &ProjectPatch) -> Result<Project> {
        let path = format!("projects/{}", project_id);
        self.put(&path, patch).await
    }

    /// Soft delete: the backend flips the project status to `deleted`.
    pub async fn delete_project(&self, project_id: Uuid) -> Result<()> {
        let path = format!("projects/{}", project_id);
        let _: serde_json::Value = self.delete(&path).await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Chat
    // ------------------------------------------------------------------

    /// Non-streaming chat send; returns the full assistant response text.
    pub async fn send_chat_message(&self, project_id: Uuid, content: &str) -> Result<String> {
        #[derive(Deserialize)]
        struct AddMessageResponse {
            ai_response: String,
        }
        let body = ChatSendBody::user(project_id, content);
        let response: AddMessageResponse = self.post("chat/add-message", &body).await?;
        Ok(response.ai_response)
    }

    // ------------------------------------------------------------------
    // Files
    // ------------------------------------------------------------------

    pub async fn create_file(&self, file: &NewFile) -> Result<ProjectFile> {
        self.post("files/create", file).await
    }

    pub async fn update_file(&self, file_id: Uuid, patch: &FilePatch) -> Result<ProjectFile> {
        let path = format!("files/update/{}", file_id);
        self.put(&path, patch).await
    }

    pub async fn delete_file(&self, project_id: Uuid, file_path: &str) -> Result<()> {
        let path = format!("files/delete/{}/{}", project_id, file_path);
        let _: serde_json::Value = self.delete(&path).await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Packages, scraping, errors
    // ------------------------------------------------------------------

    pub async fn installed_packages(&self, project_id: Uuid) -> Result<InstalledPackages> {
        let path = format!("installed-packages/{}", project_id);
        self.get(&path).await
    }

    pub async fn scrape_api_docs(&self, url: &str) -> Result<ScrapedDocs> {
        #[derive(Serialize)]
        struct ScrapeBody<'a> {
            url: &'a str,
        }
        self.post("scrape-api-docs", &ScrapeBody { url }).await
    }

    pub async fn report_error(&self, report: &ErrorReport) -> Result<()> {
        let _: serde_json::Value = self.post("errors/report", report).await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // GitHub proxy
    // ------------------------------------------------------------------

    pub async fn list_repos(
        &self,
        visibility: &str,
        sort: &str,
        per_page: u32,
        page: u32,
    ) -> Result<Vec<Repo>> {
        #[derive(Serialize)]
        struct ListReposBody<'a> {
            visibility: &'a str,
            sort: &'a str,
            per_page: u32,
            page: u32,
        }
        let body = ListReposBody {
            visibility,
            sort,
            per_page: per_page.min(100),
            page,
        };
        self.post("github/repos/list", &body).await
    }

    pub async fn get_repo(&self, owner: &str, repo: &str) -> Result<Repo> {
        let path = format!("github/repos/{}/{}", owner, repo);
        self.get(&path).await
    }

    pub async fn rate_limit(&self) -> Result<RateLimit> {
        self.get("github/rate-limit").await
    }

    // ------------------------------------------------------------------
    // Private helpers
    // ------------------------------------------------------------------

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::GET, path, None::<&()>).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        self.request(Method::POST, path, Some(body)).await
    }

    async fn put<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        self.request(Method::PUT, path, Some(body)).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::DELETE, path, None::<&()>).await
    }

    async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let url = self.base_url.join(path)?;
        tracing::debug!(%method, %url, "sending request");

        let mut request = self.http_client.request(method, url).timeout(self.timeout);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        self.handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            let text = response.text().await?;
            Ok(serde_json::from_str(&text)?)
        } else {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "request failed");
            Err(ClientError::Status { status, body })
        }
    }
}

/// Body of the streaming and non-streaming chat send operations.
#[derive(Debug, Serialize)]
struct ChatSendBody<'a> {
    project_id: Uuid,
    role: &'a str,
    content: &'a str,
}

impl<'a> ChatSendBody<'a> {
    fn user(project_id: Uuid, content: &'a str) -> Self {
        Self {
            project_id,
            role: "user",
            content,
        }
    }
}

#[async_trait]
impl WorkspaceApi for AtelierClient {
    async fn init_project(&self) -> Result<ProjectInit> {
        self.post("project/init", &()).await
    }

    async fn chat_history(&self, project_id: Uuid) -> Result<Vec<ChatMessage>> {
        #[derive(Deserialize)]
        struct HistoryResponse {
            messages: Vec<ChatMessage>,
        }
        let path = format!("chat/history/{}", project_id);
        let response: HistoryResponse = self.get(&path).await?;
        Ok(response.messages)
    }

    /// Open the chunked chat response. The returned stream yields raw text
    /// fragments in arrival order until the server closes the connection.
    async fn stream_chat(&self, project_id: Uuid, content: &str) -> Result<ChatStream> {
        let url = self.base_url.join("chat/stream")?;
        let body = ChatSendBody::user(project_id, content);

        let response = self.http_client.post(url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }

        Ok(ChatStream::new(decode_text_stream(response.bytes_stream())))
    }

    async fn list_tasks(&self, project_id: Uuid) -> Result<Vec<Task>> {
        #[derive(Deserialize)]
        struct TasksResponse {
            tasks: Vec<Task>,
        }
        let path = format!("tasks/list/{}", project_id);
        let response: TasksResponse = self.get(&path).await?;
        Ok(response.tasks)
    }

    async fn create_task(&self, task: &NewTask) -> Result<Task> {
        self.post("tasks/create", task).await
    }

    async fn update_task(&self, task_id: Uuid, patch: &TaskPatch) -> Result<Task> {
        #[derive(Serialize)]
        struct UpdateTaskBody<'a> {
            task_id: Uuid,
            #[serde(flatten)]
            patch: &'a TaskPatch,
        }
        self.post("tasks/update", &UpdateTaskBody { task_id, patch })
            .await
    }

    async fn delete_task(&self, task_id: Uuid) -> Result<()> {
        let path = format!("tasks/delete/{}", task_id);
        let _: serde_json::Value = self.delete(&path).await?;
        Ok(())
    }

    async fn list_files(&self, project_id: Uuid) -> Result<Vec<ProjectFile>> {
        #[derive(Deserialize)]
        struct FilesResponse {
            files: Vec<ProjectFile>,
        }
        let path = format!("files/read/{}", project_id);
        let response: FilesResponse = self.get(&path).await?;
        Ok(response.files)
    }

    async fn project_stats(&self, project_id: Uuid) -> Result<ProjectStats> {
        #[derive(Deserialize)]
        struct StatsResponse {
            stats: ProjectStats,
        }
        let path = format!("project/stats/{}", project_id);
        let response: StatsResponse = self.get(&path).await?;
        Ok(response.stats)
    }

    async fn open_errors(&self, project_id: Uuid) -> Result<OpenErrors> {
        let path = format!("errors/{}/open", project_id);
        self.get(&path).await
    }

    async fn resolve_error(&self, error_id: Uuid) -> Result<()> {
        let path = format!("errors/{}/resolve", error_id);
        let _: serde_json::Value = self.put(&path, &()).await?;
        Ok(())
    }

    async fn build_preview(&self, project_id: Uuid) -> Result<BuildOutcome> {
        let path = format!("preview/build/{}", project_id);
        self.post(&path, &()).await
    }

    fn preview_url(&self, project_id: Uuid) -> String {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("preview").push(&project_id.to_string());
        }
        url.to_string()
    }

    async fn create_repo(&self, spec: &RepoSpec) -> Result<Repo> {
        self.post("github/repos/create", spec).await
    }

    async fn push_files(
        &self,
        owner: &str,
        repo: &str,
        files: &[PushFile],
        branch: &str,
        update_existing: bool,
    ) -> Result<Vec<CommitInfo>> {
        #[derive(Serialize)]
        struct PushFilesBody<'a> {
            owner: &'a str,
            repo: &'a str,
            files: &'a [PushFile],
            branch: &'a str,
            update_existing: bool,
        }
        let body = PushFilesBody {
            owner,
            repo,
            files,
            branch,
            update_existing,
        };
        self.post("github/files/push-batch", &body).await
    }
}
