//! HTTP adapter for the local model-serving endpoint.
//!
//! The request is a multipart form: a `model` part, a `prompt` part, and
//! one `file0..fileN` part per attachment (file name and MIME type
//! preserved). The response body is `{"response": "..."}`; anything else —
//! non-2xx status, unparsable body, missing field — is a failure the
//! controller turns into an error-role message.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use tracing::debug;
use tutor_application::{InferenceError, InferenceGateway};
use tutor_domain::{Attachment, Model};

/// Gateway to an Ollama-style generate endpoint.
pub struct OllamaGateway {
    client: reqwest::Client,
    endpoint: String,
}

impl OllamaGateway {
    /// Create a gateway for the given generate endpoint
    /// (e.g. `http://localhost:11434/api/generate`).
    ///
    /// `timeout` bounds the whole request; a model that takes longer
    /// surfaces as [`InferenceError::RequestFailed`].
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait::async_trait]
impl InferenceGateway for OllamaGateway {
    async fn generate(
        &self,
        model: &Model,
        prompt: &str,
        attachments: &[Attachment],
    ) -> Result<String, InferenceError> {
        let mut form = Form::new()
            .text("model", model.to_string())
            .text("prompt", prompt.to_string());

        for (index, attachment) in attachments.iter().enumerate() {
            let part = Part::bytes(attachment.content.clone())
                .file_name(attachment.name.clone())
                .mime_str(&attachment.media_type)
                .map_err(|e| InferenceError::RequestFailed(e.to_string()))?;
            form = form.part(format!("file{index}"), part);
        }

        debug!(
            "generate request to {} (model {model}, {} attachments)",
            self.endpoint,
            attachments.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| InferenceError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(InferenceError::BadStatus(status.as_u16()));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| InferenceError::MalformedResponse(e.to_string()))?;

        extract_response_text(&body)
    }
}

/// Pull the generated text out of a generate-endpoint response body.
///
/// A body without a string `response` field is malformed, even on a 2xx
/// status.
fn extract_response_text(body: &serde_json::Value) -> Result<String, InferenceError> {
    body.get("response")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| InferenceError::MalformedResponse("missing `response` field".to_string()))
}
