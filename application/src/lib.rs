//! Application layer for tutor-chat
//!
//! This crate contains the port definitions for the two external
//! collaborators (conversation store, inference endpoint) and the session
//! controller that owns all chat state. It depends only on the domain layer.

pub mod ports;
pub mod session;

// Re-export commonly used types
pub use ports::{
    conversation_store::{ConversationStore, StoreUnavailable},
    inference::{InferenceError, InferenceGateway},
    transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger},
};
pub use session::controller::{
    INFERENCE_FAILURE_TEXT, LoadOutcome, SendOutcome, SessionController, SwitchOutcome,
};
