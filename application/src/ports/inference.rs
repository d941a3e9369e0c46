//! Inference gateway port
//!
//! Defines the interface to the model endpoint that turns a prompt plus
//! optional attachments into generated text.

use async_trait::async_trait;
use thiserror::Error;
use tutor_domain::{Attachment, Model};

/// Errors that can occur during an inference call.
///
/// The controller folds every variant into the same error-role path; the
/// distinction exists for logging.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("model endpoint returned status {0}")]
    BadStatus(u16),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Gateway to the model-serving endpoint.
///
/// A call may take long (bounded only by the adapter's timeout) but must
/// never block the rest of the application: the controller awaits it on
/// the async runtime.
#[async_trait]
pub trait InferenceGateway: Send + Sync {
    /// Generate a completion for `prompt` with `model`, passing
    /// `attachments` along with the request.
    async fn generate(
        &self,
        model: &Model,
        prompt: &str,
        attachments: &[Attachment],
    ) -> Result<String, InferenceError>;
}
