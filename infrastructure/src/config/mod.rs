//! Configuration loading and raw TOML data types

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileEndpointsConfig, FileLoggingConfig, FileModelEntry, FileModelsConfig,
};
pub use loader::ConfigLoader;
