//! Model value object representing an inference model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Available inference models (Value Object)
///
/// The enumerated set mirrors what the local model server exposes; ids not
/// in the set are carried verbatim as [`Model::Custom`] so that a
/// config-supplied model can still be selected and sent to the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    QwenVision,
    QwenChat,
    Llama3,
    Mistral,
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::QwenVision => "qwen-vision",
            Model::QwenChat => "qwen-chat",
            Model::Llama3 => "llama3",
            Model::Mistral => "mistral",
            Model::Custom(s) => s,
        }
    }

    /// Human-readable name; falls back to the raw id for custom models.
    pub fn display_name(&self) -> &str {
        match self {
            Model::QwenVision => "Qwen Vision",
            Model::QwenChat => "Qwen Chat",
            Model::Llama3 => "Llama 3",
            Model::Mistral => "Mistral",
            Model::Custom(s) => s,
        }
    }

    /// Short capability description shown when listing models.
    pub fn description(&self) -> &str {
        match self {
            Model::QwenVision => "Best for image analysis and vision tasks",
            Model::QwenChat => "General conversation and reasoning",
            Model::Llama3 => "Advanced reasoning and text generation",
            Model::Mistral => "Efficient and fast responses",
            Model::Custom(_) => "",
        }
    }

    /// The built-in model set, in the order it is presented for selection.
    pub fn built_in() -> Vec<Model> {
        vec![
            Model::QwenVision,
            Model::QwenChat,
            Model::Llama3,
            Model::Mistral,
        ]
    }
}

impl Default for Model {
    /// Returns the default model (Qwen Vision)
    fn default() -> Self {
        Model::QwenVision
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "qwen-vision" => Model::QwenVision,
            "qwen-chat" => Model::QwenChat,
            "llama3" => Model::Llama3,
            "mistral" => Model::Mistral,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().unwrap())
    }
}

/// Catalog entry: display metadata for one selectable model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInfo {
    pub id: Model,
    pub display_name: String,
    pub description: String,
}

impl ModelInfo {
    pub fn new(
        id: Model,
        display_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            description: description.into(),
        }
    }
}

/// The set of models offered for selection.
///
/// Built-ins plus whatever the configuration adds. Display-only: the
/// session stores and sends the active model id verbatim, so an id outside
/// the catalog still works, it just renders as its raw string.
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    entries: Vec<ModelInfo>,
}

impl ModelCatalog {
    /// Catalog containing only the built-in model set.
    pub fn built_in() -> Self {
        let entries = Model::built_in()
            .into_iter()
            .map(|m| ModelInfo::new(m.clone(), m.display_name(), m.description()))
            .collect();
        Self { entries }
    }

    /// Append extra entries, skipping ids already present.
    pub fn extend(&mut self, extra: impl IntoIterator<Item = ModelInfo>) {
        for info in extra {
            if !self.contains(&info.id) {
                self.entries.push(info);
            }
        }
    }

    pub fn entries(&self) -> &[ModelInfo] {
        &self.entries
    }

    pub fn contains(&self, model: &Model) -> bool {
        self.entries.iter().any(|e| &e.id == model)
    }

    /// Display name for a model, falling back to the raw id when the model
    /// is not in the catalog.
    pub fn display_name_for(&self, model: &Model) -> String {
        self.entries
            .iter()
            .find(|e| &e.id == model)
            .map(|e| e.display_name.clone())
            .unwrap_or_else(|| model.to_string())
    }
}
