//! Conversation store adapter (HTTP backend).

mod http;

pub use http::HttpConversationStore;
