//! Domain layer for tutor-chat
//!
//! This crate contains the core entities and value objects of the
//! teacher-assistant chat: conversations, messages, attachments, the
//! ephemeral session, and the model catalog. It has no dependencies on
//! infrastructure or presentation concerns.

pub mod chat;
pub mod core;

// Re-export commonly used types
pub use chat::{
    attachment::{Attachment, AttachmentKind, media_type_for_name},
    entities::{Conversation, ConversationSummary, Message, Role},
    session::Session,
    title::{DEFAULT_TITLE, TITLE_MAX_BYTES, derive_title},
};
pub use core::model::{Model, ModelCatalog, ModelInfo};
