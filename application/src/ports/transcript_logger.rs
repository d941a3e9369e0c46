//! Port for structured transcript logging.
//!
//! Defines the [`TranscriptLogger`] trait for recording the chat exchange
//! (user turns, model responses, persistence outcomes) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures the transcript in
//! a machine-readable format (JSONL).

use serde_json::Value;

/// A structured transcript event.
pub struct TranscriptEvent {
    /// Event type identifier (e.g., "user_message", "assistant_response").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl TranscriptEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Sink for transcript events.
///
/// `log` is intentionally synchronous and non-fallible: a logging failure
/// must never disturb the send/receive flow, so failures are silently
/// dropped by implementations.
pub trait TranscriptLogger: Send + Sync {
    /// Record a transcript event.
    fn log(&self, event: TranscriptEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoTranscriptLogger;

impl TranscriptLogger for NoTranscriptLogger {
    fn log(&self, _event: TranscriptEvent) {}
}
