//! HTTP adapter for the conversation store backend.
//!
//! Wire format:
//!
//! - `GET  {base}/conversations`      → `[{id, title, createdAt, messageCount}]`
//! - `GET  {base}/conversations/{id}` → full conversation with messages
//! - `POST {base}/conversations`      → body `{title, messages, createdAt, lastUpdated}`,
//!   returns the stored summary
//!
//! The wire DTOs are kept separate from the domain types: field names are
//! camelCase, message roles travel in a `type` field, attachments in
//! `files` with base64-encoded content. Any transport, status, or decoding
//! problem collapses into the single [`StoreUnavailable`] condition.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tutor_application::{ConversationStore, StoreUnavailable};
use tutor_domain::{Attachment, Conversation, ConversationSummary, Message, Role};

/// Conversation store backed by the HTTP backend API.
pub struct HttpConversationStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpConversationStore {
    /// Create a store client for the given API base URL
    /// (e.g. `http://localhost:8080/api`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait::async_trait]
impl ConversationStore for HttpConversationStore {
    async fn list(&self) -> Result<Vec<ConversationSummary>, StoreUnavailable> {
        let response = self
            .client
            .get(self.url("/conversations"))
            .send()
            .await
            .map_err(StoreUnavailable::transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreUnavailable::transport(format!("HTTP {status}")));
        }

        let summaries: Vec<SummaryDto> =
            response.json().await.map_err(StoreUnavailable::decode)?;
        Ok(summaries.into_iter().map(SummaryDto::into_domain).collect())
    }

    async fn get(&self, id: &str) -> Result<Conversation, StoreUnavailable> {
        let response = self
            .client
            .get(self.url(&format!("/conversations/{id}")))
            .send()
            .await
            .map_err(StoreUnavailable::transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreUnavailable::transport(format!("HTTP {status}")));
        }

        let dto: ConversationDto = response.json().await.map_err(StoreUnavailable::decode)?;
        dto.into_domain()
    }

    async fn save(
        &self,
        conversation: &Conversation,
    ) -> Result<ConversationSummary, StoreUnavailable> {
        let response = self
            .client
            .post(self.url("/conversations"))
            .json(&ConversationDto::from_domain(conversation))
            .send()
            .await
            .map_err(StoreUnavailable::transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreUnavailable::transport(format!("HTTP {status}")));
        }

        let summary: SummaryDto = response.json().await.map_err(StoreUnavailable::decode)?;
        Ok(summary.into_domain())
    }
}

// ==================== Wire DTOs ====================

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryDto {
    id: String,
    title: String,
    created_at: DateTime<Utc>,
    message_count: usize,
}

impl SummaryDto {
    fn into_domain(self) -> ConversationSummary {
        ConversationSummary {
            id: self.id,
            title: self.title,
            created_at: self.created_at,
            message_count: self.message_count,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConversationDto {
    /// Present on fetched conversations; never sent — the POST body
    /// carries no id, creation is the store's decision.
    #[serde(default, skip_serializing)]
    id: Option<String>,
    title: String,
    messages: Vec<MessageDto>,
    created_at: DateTime<Utc>,
    last_updated: DateTime<Utc>,
}

impl ConversationDto {
    fn from_domain(conversation: &Conversation) -> Self {
        Self {
            id: conversation.id.clone(),
            title: conversation.title.clone(),
            messages: conversation.messages.iter().map(MessageDto::from_domain).collect(),
            created_at: conversation.created_at,
            last_updated: conversation.last_updated,
        }
    }

    fn into_domain(self) -> Result<Conversation, StoreUnavailable> {
        let messages = self
            .messages
            .into_iter()
            .map(MessageDto::into_domain)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Conversation {
            id: self.id,
            title: self.title,
            messages,
            created_at: self.created_at,
            last_updated: self.last_updated,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RoleDto {
    User,
    Assistant,
    Error,
}

impl RoleDto {
    fn from_domain(role: Role) -> Self {
        match role {
            Role::User => RoleDto::User,
            Role::Assistant => RoleDto::Assistant,
            Role::Error => RoleDto::Error,
        }
    }

    fn into_domain(self) -> Role {
        match self {
            RoleDto::User => Role::User,
            RoleDto::Assistant => Role::Assistant,
            RoleDto::Error => Role::Error,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct MessageDto {
    id: String,
    #[serde(rename = "type")]
    role: RoleDto,
    content: String,
    timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    files: Vec<AttachmentDto>,
}

impl MessageDto {
    fn from_domain(message: &Message) -> Self {
        Self {
            id: message.id.clone(),
            role: RoleDto::from_domain(message.role),
            content: message.content.clone(),
            timestamp: message.timestamp,
            files: message.attachments.iter().map(AttachmentDto::from_domain).collect(),
        }
    }

    fn into_domain(self) -> Result<Message, StoreUnavailable> {
        let attachments = self
            .files
            .into_iter()
            .map(AttachmentDto::into_domain)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Message {
            id: self.id,
            role: self.role.into_domain(),
            content: self.content,
            timestamp: self.timestamp,
            attachments,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct AttachmentDto {
    name: String,
    size: u64,
    #[serde(rename = "type")]
    media_type: String,
    /// Base64-encoded file bytes; absent when the store elides content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<String>,
}

impl AttachmentDto {
    fn from_domain(attachment: &Attachment) -> Self {
        Self {
            name: attachment.name.clone(),
            size: attachment.byte_size,
            media_type: attachment.media_type.clone(),
            content: if attachment.content.is_empty() {
                None
            } else {
                Some(BASE64.encode(&attachment.content))
            },
        }
    }

    fn into_domain(self) -> Result<Attachment, StoreUnavailable> {
        let content = match self.content {
            Some(encoded) => BASE64.decode(encoded).map_err(StoreUnavailable::decode)?,
            None => Vec::new(),
        };
        Ok(Attachment {
            name: self.name,
            byte_size: self.size,
            media_type: self.media_type,
            content,
        })
    }
}
