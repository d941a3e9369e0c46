//! Inference endpoint adapter (local model server).

mod ollama;

pub use ollama::OllamaGateway;
