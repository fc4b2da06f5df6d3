use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Classification of a reported error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Build,
    Runtime,
    Api,
}

/// An error captured during build, preview execution or an API call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub id: Uuid,
    pub project_id: Uuid,
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_snippet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
    pub resolved: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Client-originated error report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    pub project_id: Uuid,
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_snippet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
}

impl ErrorReport {
    pub fn new(project_id: Uuid, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            project_id,
            kind,
            message: message.into(),
            file_path: None,
            line_number: None,
            code_snippet: None,
            stack_trace: None,
        }
    }
}

/// Counts by state and category, computed by the backend per fetch.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ErrorSummary {
    pub total: u64,
    pub open: u64,
    pub resolved: u64,
    pub build: u64,
    pub runtime: u64,
    pub api: u64,
}

/// Open-error list plus its summary, as returned by the polling endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenErrors {
    pub errors: Vec<ErrorDetail>,
    pub summary: ErrorSummary,
}

impl OpenErrors {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
