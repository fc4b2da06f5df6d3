use std::sync::Arc;

use atelier_client::WorkspaceApi;
use atelier_types::{PushFile, RepoSpec};

/// Where a push should land.
pub enum PushTarget {
    /// Create the repository first, then push into it.
    New(RepoSpec),
    Existing { owner: String, repo: String },
}

/// Outcome of a push, with the human-readable progress log the dialog
/// renders line by line.
#[derive(Debug, Clone, Default)]
pub struct PushReport {
    pub success: bool,
    /// Web URL of the repository, when known.
    pub repo_url: Option<String>,
    pub log: Vec<String>,
}

/// Two-step GitHub export: optionally create a repository, then push the
/// project files as a batch of commits.
pub struct GithubPushFlow {
    api: Arc<dyn WorkspaceApi>,
}

impl GithubPushFlow {
    pub fn new(api: Arc<dyn WorkspaceApi>) -> Self {
        Self { api }
    }

    /// Push `files` to the target repository on `branch`.
    ///
    /// When repository creation fails the push is not attempted; the report
    /// carries the log up to the failure.
    pub async fn push(&self, target: PushTarget, files: &[PushFile], branch: &str) -> PushReport {
        let mut report = PushReport::default();

        let (owner, repo) = match target {
            PushTarget::New(spec) => {
                report.log.push(format!("Creating repository {}...", spec.name));
                match self.api.create_repo(&spec).await {
                    Ok(created) => {
                        report.log.push(format!("Repository ready: {}", created.full_name));
                        report.repo_url = Some(created.html_url.clone());
                        let owner = created.owner().to_string();
                        (owner, created.name)
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "repository creation failed");
                        report.log.push(format!("Failed to create repository: {e}"));
                        return report;
                    }
                }
            }
            PushTarget::Existing { owner, repo } => {
                report.log.push(format!("Using repository {owner}/{repo}"));
                (owner, repo)
            }
        };

        report
            .log
            .push(format!("Pushing {} files to {branch}...", files.len()));
        match self
            .api
            .push_files(&owner, &repo, files, branch, true)
            .await
        {
            Ok(commits) => {
                report
                    .log
                    .push(format!("Pushed {} files ({} commits)", files.len(), commits.len()));
                report.success = true;
            }
            Err(e) => {
                tracing::warn!(error = %e, "push failed");
                report.log.push(format!("Push failed: {e}"));
            }
        }
        report
    }
}
