use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Active,
    Archived,
    Deleted,
}

/// Full project record as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_accessed_at: Option<DateTime<Utc>>,
}

/// Summary row used by project list views.
///
/// The backend computes the counts with a join, so they are absent from the
/// full record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub feature_count: i64,
    pub integration_count: i64,
}

/// Feature line captured at project creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureSpec {
    pub text: String,
    #[serde(default)]
    pub order_index: i32,
}

/// Integration toggle captured at project creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrationSpec {
    pub name: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
}

fn default_true() -> bool {
    true
}

/// Request body for creating a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProject {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub features: Vec<FeatureSpec>,
    #[serde(default)]
    pub integrations: Vec<IntegrationSpec>,
}

impl NewProject {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            features: Vec::new(),
            integrations: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_features(mut self, features: Vec<FeatureSpec>) -> Self {
        self.features = features;
        self
    }
}

/// Partial project update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
}

/// Response of the initialize-default operation.
///
/// The backend either adopts the most recent active project or creates a
/// fresh default one; `is_new` says which happened.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectInit {
    pub project_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub is_new: bool,
}

/// Derived counts recomputed by the backend on demand.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ProjectStats {
    pub file_count: u64,
    pub task_count: u64,
    pub completed_task_count: u64,
    pub line_count: u64,
}
