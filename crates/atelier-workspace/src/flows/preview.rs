use std::sync::Arc;

use atelier_client::WorkspaceApi;
use uuid::Uuid;

/// Result of a preview build, ready for the preview panel to render.
#[derive(Debug, Clone, Default)]
pub struct PreviewState {
    /// URL to load in the preview frame, set only on success.
    pub url: Option<String>,
    pub logs: Vec<String>,
    pub error: Option<String>,
    pub building: bool,
}

/// Triggers server-side preview builds and shapes the outcome for display.
pub struct PreviewFlow {
    api: Arc<dyn WorkspaceApi>,
}

impl PreviewFlow {
    pub fn new(api: Arc<dyn WorkspaceApi>) -> Self {
        Self { api }
    }

    /// Run a build. A failed build carries its logs and error message; a
    /// failed request carries only the error. The previous preview URL is
    /// for the caller to keep or drop.
    pub async fn build(&self, project_id: Uuid) -> PreviewState {
        match self.api.build_preview(project_id).await {
            Ok(outcome) if outcome.success => PreviewState {
                url: Some(self.api.preview_url(project_id)),
                logs: outcome.logs,
                error: None,
                building: false,
            },
            Ok(outcome) => PreviewState {
                url: None,
                logs: outcome.logs,
                error: outcome.error.or_else(|| Some("Build failed".to_string())),
                building: false,
            },
            Err(e) => {
                tracing::warn!(%project_id, error = %e, "preview build request failed");
                PreviewState {
                    url: None,
                    logs: Vec::new(),
                    error: Some(format!("Build request failed: {e}")),
                    building: false,
                }
            }
        }
    }
}
