//! The ephemeral session: in-memory working state of the active conversation.

use crate::chat::attachment::Attachment;
use crate::chat::entities::{Conversation, Message};
use crate::core::model::Model;
use chrono::{DateTime, Utc};

/// In-memory, non-persisted working set of the active conversation (Entity)
///
/// Mutated exclusively through the session controller; the view layer only
/// reads. Pending attachments belong to the session until a send transfers
/// them into the outgoing message.
#[derive(Debug, Clone)]
pub struct Session {
    active_conversation_id: Option<String>,
    conversation_created_at: Option<DateTime<Utc>>,
    draft_text: String,
    pending_attachments: Vec<Attachment>,
    selected_model: Model,
    busy: bool,
    visible_messages: Vec<Message>,
    next_seq: u64,
}

impl Session {
    pub fn new(model: Model) -> Self {
        Self {
            active_conversation_id: None,
            conversation_created_at: None,
            draft_text: String::new(),
            pending_attachments: Vec::new(),
            selected_model: model,
            busy: false,
            visible_messages: Vec::new(),
            next_seq: 0,
        }
    }

    pub fn active_conversation_id(&self) -> Option<&str> {
        self.active_conversation_id.as_deref()
    }

    /// Creation instant of the active conversation, if it was loaded from
    /// the store. A never-saved conversation has none yet.
    pub fn conversation_created_at(&self) -> Option<DateTime<Utc>> {
        self.conversation_created_at
    }

    pub fn draft_text(&self) -> &str {
        &self.draft_text
    }

    pub fn pending_attachments(&self) -> &[Attachment] {
        &self.pending_attachments
    }

    pub fn selected_model(&self) -> &Model {
        &self.selected_model
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn visible_messages(&self) -> &[Message] {
        &self.visible_messages
    }

    /// Whether there is anything to send: non-empty draft or at least one
    /// pending attachment.
    pub fn has_outgoing(&self) -> bool {
        !self.draft_text.is_empty() || !self.pending_attachments.is_empty()
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft_text = text.into();
    }

    pub fn set_model(&mut self, model: Model) {
        self.selected_model = model;
    }

    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    /// Append files to the pending set, preserving the order supplied.
    pub fn attach(&mut self, files: Vec<Attachment>) {
        self.pending_attachments.extend(files);
    }

    /// Remove a pending attachment by index. Out of range is a no-op.
    pub fn discard_pending(&mut self, index: usize) -> Option<Attachment> {
        if index < self.pending_attachments.len() {
            Some(self.pending_attachments.remove(index))
        } else {
            None
        }
    }

    /// Remove an attachment from an already-sent message.
    ///
    /// The attachment sequence of a sent message may only shrink; unknown
    /// message id or out-of-range index is a no-op. Returns whether a
    /// removal happened.
    pub fn discard_sent(&mut self, message_id: &str, index: usize) -> bool {
        let Some(message) = self
            .visible_messages
            .iter_mut()
            .find(|m| m.id == message_id)
        else {
            return false;
        };
        if index < message.attachments.len() {
            message.attachments.remove(index);
            true
        } else {
            false
        }
    }

    /// Transfer ownership of the pending attachments to the caller,
    /// leaving the pending set empty.
    pub fn take_pending_attachments(&mut self) -> Vec<Attachment> {
        std::mem::take(&mut self.pending_attachments)
    }

    pub fn append_message(&mut self, message: Message) {
        self.visible_messages.push(message);
    }

    /// Clear the input area: draft text and pending attachments.
    pub fn clear_input(&mut self) {
        self.draft_text.clear();
        self.pending_attachments.clear();
    }

    /// Reset to a fresh, unsaved conversation. Idempotent.
    pub fn reset(&mut self) {
        self.active_conversation_id = None;
        self.conversation_created_at = None;
        self.visible_messages.clear();
        self.clear_input();
    }

    /// Replace the working set with a conversation loaded from the store.
    /// Repeat loads are last-write-wins.
    pub fn open(&mut self, conversation: Conversation) {
        self.active_conversation_id = conversation.id;
        self.conversation_created_at = Some(conversation.created_at);
        self.visible_messages = conversation.messages;
        self.clear_input();
    }

    /// Allocate a message id: epoch millis plus a session-local sequence,
    /// so ids sort by creation order even within the same millisecond.
    pub fn next_message_id(&mut self) -> String {
        self.next_seq += 1;
        format!("{}-{}", Utc::now().timestamp_millis(), self.next_seq)
    }
}
