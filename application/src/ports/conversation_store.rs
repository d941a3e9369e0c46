//! Conversation store port
//!
//! Persistence interface for conversation threads. The store is the system
//! of record; the session holds a working copy that may diverge until the
//! next successful save.

use async_trait::async_trait;
use thiserror::Error;
use tutor_domain::{Conversation, ConversationSummary};

/// Opaque store failure.
///
/// Transport and decoding problems are collapsed into a single condition:
/// the controller only ever degrades on store failure, it never branches on
/// the cause. The reason string is kept for logs.
#[derive(Debug, Clone, Error)]
#[error("conversation store unavailable: {reason}")]
pub struct StoreUnavailable {
    reason: String,
}

impl StoreUnavailable {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self {
            reason: err.to_string(),
        }
    }

    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self {
            reason: format!("invalid response: {err}"),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Persistence of conversation threads.
///
/// Summaries carry metadata only; full message bodies are fetched lazily
/// via [`ConversationStore::get`].
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// List summaries of all persisted conversations.
    async fn list(&self) -> Result<Vec<ConversationSummary>, StoreUnavailable>;

    /// Fetch a full conversation by id.
    async fn get(&self, id: &str) -> Result<Conversation, StoreUnavailable>;

    /// Persist a conversation, returning its store-side summary.
    async fn save(
        &self,
        conversation: &Conversation,
    ) -> Result<ConversationSummary, StoreUnavailable>;
}
