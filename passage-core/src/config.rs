use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{PassageError, Result};

/// Character budget of a single post.
pub const DEFAULT_MAX_CHARACTERS: usize = 824;

/// Room reserved for the hard-cut fallback, so the budget must exceed it.
pub const MIN_MAX_CHARACTERS: usize = 4;

/// Settings shared by the chunking and publishing phases
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Maximum characters per passage and per displayed post
    #[serde(default = "default_max_characters")]
    pub max_characters: usize,

    /// Plain-text source read by chunk-passages
    #[serde(default = "default_source_file")]
    pub source_file: PathBuf,

    /// JSON passage store written by chunk-passages, read by daily-passage
    #[serde(default = "default_store_file")]
    pub store_file: PathBuf,

    /// JSON document holding the index of the last published passage
    #[serde(default = "default_progress_file")]
    pub progress_file: PathBuf,

    /// Title line printed above each passage
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_max_characters() -> usize {
    DEFAULT_MAX_CHARACTERS
}

fn default_source_file() -> PathBuf {
    PathBuf::from("thucydides.txt")
}

fn default_store_file() -> PathBuf {
    PathBuf::from("thucydides.json")
}

fn default_progress_file() -> PathBuf {
    PathBuf::from("progress.json")
}

fn default_title() -> String {
    "Daily Thucydides Passage".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_characters: default_max_characters(),
            source_file: default_source_file(),
            store_file: default_store_file(),
            progress_file: default_progress_file(),
            title: default_title(),
        }
    }
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, returning defaults if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the configuration file path: ~/.config/cli-programs/daily-passage.toml
    pub fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| PassageError::InvalidConfig("HOME not set".into()))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("cli-programs")
            .join("daily-passage.toml"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_characters < MIN_MAX_CHARACTERS {
            return Err(PassageError::InvalidConfig(format!(
                "max_characters must be at least {}, got {}",
                MIN_MAX_CHARACTERS, self.max_characters
            )));
        }
        Ok(())
    }
}
