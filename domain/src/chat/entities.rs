//! Conversation entities

use crate::chat::attachment::Attachment;
use chrono::{DateTime, Utc};

/// Role of a turn in a conversation
///
/// `Error` is a first-class role: a failed exchange is recorded in the
/// visible log rather than surfaced through a side channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
    Error,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Error => "error",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One turn in a conversation (Entity)
///
/// Immutable once appended, with one exception: the attachment sequence
/// may shrink (removal) but never reorders or grows.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub attachments: Vec<Attachment>,
}

impl Message {
    pub fn user(
        id: impl Into<String>,
        content: impl Into<String>,
        attachments: Vec<Attachment>,
    ) -> Self {
        Self {
            id: id.into(),
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
            attachments,
        }
    }

    pub fn assistant(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: Role::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
            attachments: Vec::new(),
        }
    }

    pub fn error(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: Role::Error,
            content: content.into(),
            timestamp: Utc::now(),
            attachments: Vec::new(),
        }
    }
}

/// A persisted conversation thread (Entity)
///
/// `id` is assigned by the store; a new, never-saved conversation has none.
/// The message sequence is append-only from the client's point of view.
#[derive(Debug, Clone)]
pub struct Conversation {
    pub id: Option<String>,
    pub title: String,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

/// Store-side listing entry; full message bodies are fetched lazily.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationSummary {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub message_count: usize,
}
