//! Infrastructure layer for tutor-chat
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer, plus configuration file loading.

pub mod config;
pub mod inference;
pub mod logging;
pub mod store;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig, FileEndpointsConfig, FileLoggingConfig, FileModelsConfig};
pub use inference::OllamaGateway;
pub use logging::JsonlTranscriptLogger;
pub use store::HttpConversationStore;
