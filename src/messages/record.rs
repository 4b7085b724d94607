//! The message record transfer shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author of a message record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Text typed by the person using the chat.
    User,
    /// Reply produced by the assistant.
    System,
}

impl Role {
    /// Wire name of the role, also used as a CSS modifier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::System => "system",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single turn in the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Unique record identifier.
    pub id: Uuid,
    /// Who produced the record.
    pub role: Role,
    /// Display text for the chat bubble.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Markdown payload rendered in the response panel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    /// Creation time.
    #[serde(alias = "date_created")]
    pub created_at: DateTime<Utc>,
}

impl MessageRecord {
    /// Create a user record from typed text.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::User,
            content: Some(content.into()),
            data: None,
            created_at: Utc::now(),
        }
    }

    /// Create a system record with bubble text and an optional markdown payload.
    #[must_use]
    pub fn system(content: impl Into<String>, data: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::System,
            content: Some(content.into()),
            data,
            created_at: Utc::now(),
        }
    }

    /// Whether the record carries a non-blank markdown payload.
    #[must_use]
    pub fn has_markdown(&self) -> bool {
        self.data.as_deref().is_some_and(|d| !d.trim().is_empty())
    }

    /// Bubble text, or an empty string when absent.
    #[must_use]
    pub fn content_text(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::System).unwrap();
        assert_eq!(json, "\"system\"");
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let record = MessageRecord::user("hello");
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["role"], "user");
        assert_eq!(value["content"], "hello");
        assert!(value.get("data").is_none());
        assert!(value.get("created_at").is_some());
    }

    #[test]
    fn test_accepts_date_created_alias() {
        let json = r#"{
            "id": "6f9619ff-8b86-d011-b42d-00c04fc964ff",
            "role": "system",
            "data": "- one",
            "date_created": "2024-11-02T10:00:00Z"
        }"#;

        let record: MessageRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.role, Role::System);
        assert!(record.content.is_none());
        assert!(record.has_markdown());
        assert_eq!(record.content_text(), "");
    }

    #[test]
    fn test_blank_payload_is_not_markdown() {
        let record = MessageRecord::system("ok", Some("   ".to_string()));
        assert!(!record.has_markdown());
    }
}
