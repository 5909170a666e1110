use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Config file not found")]
    NotFound,

    #[error("Unsupported LLM provider: {0}")]
    UnsupportedProvider(String),

    #[error("No API key configured for LLM provider: {0}")]
    MissingCredential(String),

    #[error("Unsupported GRAPH_DB_TYPE: {0}")]
    UnsupportedGraphDb(String),

    #[error("Failed to initialise provider: {0}")]
    ProviderInit(anyhow::Error),

    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}
