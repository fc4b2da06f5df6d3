use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
    System,
}

/// A single chat message.
///
/// Assistant messages are created empty and have their `content` replaced
/// repeatedly while the response streams in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub project_id: Uuid,
    pub role: ChatRole,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(project_id: Uuid, content: impl Into<String>) -> Self {
        Self::with_role(project_id, ChatRole::User, content.into())
    }

    /// Empty assistant placeholder, filled in as the stream arrives.
    pub fn assistant_placeholder(project_id: Uuid) -> Self {
        Self::with_role(project_id, ChatRole::Assistant, String::new())
    }

    fn with_role(project_id: Uuid, role: ChatRole, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id,
            role,
            content,
            metadata: None,
            created_at: Utc::now(),
        }
    }
}
