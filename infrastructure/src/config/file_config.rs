//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tutor_domain::{Model, ModelInfo};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Backend endpoints
    pub endpoints: FileEndpointsConfig,
    /// Model selection and catalog extension
    pub models: FileModelsConfig,
    /// Transcript and diagnostic logging
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration, returning human-readable warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if let Some(default) = &self.models.default
            && default.trim().is_empty()
        {
            issues.push("models.default: model id cannot be empty".to_string());
        }
        for entry in &self.models.extra {
            if entry.id.trim().is_empty() {
                issues.push("models.extra: model id cannot be empty".to_string());
            }
        }
        if self.endpoints.request_timeout_secs == 0 {
            issues.push("endpoints.request_timeout_secs: must be at least 1".to_string());
        }

        issues
    }
}

/// Backend endpoints (`[endpoints]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEndpointsConfig {
    /// Base URL of the conversation store API
    pub store_url: String,
    /// URL of the model generate endpoint
    pub inference_url: String,
    /// Request timeout for inference calls, in seconds
    pub request_timeout_secs: u64,
}

impl Default for FileEndpointsConfig {
    fn default() -> Self {
        Self {
            store_url: "http://localhost:8080/api".to_string(),
            inference_url: "http://localhost:11434/api/generate".to_string(),
            request_timeout_secs: 120,
        }
    }
}

/// Model selection and catalog extension (`[models]` section)
///
/// # Example
///
/// ```toml
/// [models]
/// default = "qwen-chat"
///
/// [[models.extra]]
/// id = "phi3"
/// name = "Phi 3"
/// description = "Compact local model"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    /// Model selected at startup
    pub default: Option<String>,
    /// Extra catalog entries beyond the built-in set
    pub extra: Vec<FileModelEntry>,
}

impl FileModelsConfig {
    /// Parse the startup model. Empty ids are reported by `validate()` and
    /// skipped here.
    pub fn parse_default(&self) -> Option<Model> {
        self.default
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            // Model::from_str is infallible; unknown ids become Custom(...)
            .map(|s| s.parse().unwrap())
    }

    /// Catalog entries contributed by the config.
    pub fn extra_entries(&self) -> Vec<ModelInfo> {
        self.extra
            .iter()
            .filter(|e| !e.id.trim().is_empty())
            .map(|e| {
                ModelInfo::new(
                    e.id.parse().unwrap(),
                    e.name.clone().unwrap_or_else(|| e.id.clone()),
                    e.description.clone().unwrap_or_default(),
                )
            })
            .collect()
    }
}

/// One extra model catalog entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelEntry {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Transcript and diagnostic logging (`[logging]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Whether to write a JSONL transcript of each chat session
    pub transcript: bool,
    /// Directory for transcript files; platform data dir when unset
    pub transcript_dir: Option<PathBuf>,
    /// Optional file for tracing diagnostics (stderr when unset)
    pub log_file: Option<PathBuf>,
}

impl Default for FileLoggingConfig {
    fn default() -> Self {
        Self {
            transcript: true,
            transcript_dir: None,
            log_file: None,
        }
    }
}
