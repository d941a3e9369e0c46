//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for tutor-chat
#[derive(Parser, Debug)]
#[command(name = "tutor-chat")]
#[command(author, version, about = "LLM Teacher Assistant - chat with a local model")]
#[command(long_about = r#"
tutor-chat sends prompts (and attached files) to a local model-serving
endpoint and keeps the resulting conversations in a backend store.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./tutor.toml        Project-level config
3. ~/.config/tutor-chat/config.toml   Global config

Example:
  tutor-chat "Generate five MCQs about photosynthesis"
  tutor-chat --chat -m qwen-chat
  tutor-chat --chat --inference-url http://localhost:11434/api/generate
"#)]
pub struct Cli {
    /// The question to send (not required in chat mode)
    pub question: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Model to chat with (defaults to the configured model)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Base URL of the conversation store API
    #[arg(long, value_name = "URL")]
    pub store_url: Option<String>,

    /// URL of the model generate endpoint
    #[arg(long, value_name = "URL")]
    pub inference_url: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Disable the JSONL transcript for this run
    #[arg(long)]
    pub no_transcript: bool,
}
