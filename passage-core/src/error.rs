use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PassageError {
    #[error("Malformed source: {0}")]
    MalformedSource(String),

    #[error("Passage store not found: {}. Run chunk-passages first.", .0.display())]
    MissingStore(PathBuf),

    #[error("Passage store is empty, nothing to publish")]
    EmptyStore,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Display sink error: {0}")]
    Sink(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, PassageError>;
