use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A versioned file in the project's virtual file system.
///
/// Only files with `is_active` set are part of the current working tree;
/// superseded versions keep their rows with the flag cleared. The backend
/// assigns version numbers. Among active files of a project, `path` is
/// unique (the tree builder relies on this).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectFile {
    pub id: Uuid,
    pub project_id: Uuid,
    pub path: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    pub version: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFile {
    pub project_id: Uuid,
    pub path: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
}

/// Partial file update. `None` fields are left untouched (shallow merge).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
}

impl FilePatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Apply this patch to a file in place.
    pub fn apply_to(&self, file: &mut ProjectFile) {
        if let Some(content) = &self.content {
            file.content = content.clone();
        }
        if let Some(language) = &self.language {
            file.language = Some(language.clone());
        }
        if let Some(file_type) = &self.file_type {
            file.file_type = Some(file_type.clone());
        }
        file.updated_at = Utc::now();
    }
}
