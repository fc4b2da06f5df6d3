use serde::{Deserialize, Serialize};

/// GitHub repository as returned by the backend's GitHub proxy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repo {
    pub id: i64,
    pub name: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub html_url: String,
    pub clone_url: String,
    pub ssh_url: String,
    pub default_branch: String,
    pub private: bool,
    pub created_at: String,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pushed_at: Option<String>,
}

impl Repo {
    /// `owner` part of `full_name` ("owner/repo").
    pub fn owner(&self) -> &str {
        self.full_name
            .split_once('/')
            .map(|(owner, _)| owner)
            .unwrap_or(&self.full_name)
    }
}

/// Request body for creating a repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoSpec {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub private: bool,
    #[serde(default = "default_true")]
    pub auto_init: bool,
}

fn default_true() -> bool {
    true
}

impl RepoSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            private: false,
            auto_init: true,
        }
    }

    pub fn private(mut self) -> Self {
        self.private = true;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// One file of a batch push. Content is plain text; the backend takes care
/// of base64 encoding for the contents API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushFile {
    pub path: String,
    pub content: String,
    pub message: String,
}

/// Commit produced by pushing a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitInfo {
    pub sha: String,
    pub url: String,
    pub html_url: String,
}

/// Remaining/limit pair from the rate-limit probe.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RateLimit {
    pub remaining: u32,
    pub limit: u32,
}
