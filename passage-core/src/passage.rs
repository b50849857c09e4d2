//! Passage records and the JSON passage store.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{PassageError, Result};
use crate::fsio::write_json_atomic;

/// One publishable slice of a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    /// Book label, e.g. "BOOK I"
    pub book: String,
    /// Chapter label, e.g. "CHAPTER IV"
    pub chapter: String,
    /// Segment text, bounded by the configured character budget
    pub text: String,
    /// "i/n" when the chapter was split into several segments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part: Option<String>,
}

impl Passage {
    pub fn new(book: impl Into<String>, chapter: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            book: book.into(),
            chapter: chapter.into(),
            text: text.into(),
            part: None,
        }
    }

    pub fn with_part(mut self, index: usize, total: usize) -> Self {
        self.part = Some(format!("{}/{}", index, total));
        self
    }
}

/// Load every passage from the store at `path`.
pub fn load_passages(path: &Path) -> Result<Vec<Passage>> {
    if !path.exists() {
        return Err(PassageError::MissingStore(path.to_path_buf()));
    }

    let file = File::open(path)?;
    let passages: Vec<Passage> = serde_json::from_reader(BufReader::new(file))?;
    log::debug!("Loaded {} passages from {}", passages.len(), path.display());
    Ok(passages)
}

/// Write the full passage sequence to `path`, replacing any previous store.
pub fn save_passages(path: &Path, passages: &[Passage]) -> Result<()> {
    write_json_atomic(path, passages)?;
    log::debug!("Wrote {} passages to {}", passages.len(), path.display());
    Ok(())
}

/// Summary figures for a passage sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassageStats {
    pub total: usize,
    /// Mean text length in characters, rounded down
    pub average_chars: usize,
    pub longest_chars: usize,
}

impl PassageStats {
    pub fn from_passages(passages: &[Passage]) -> Self {
        let lengths: Vec<usize> = passages.iter().map(|p| p.text.chars().count()).collect();
        let total = lengths.len();
        let sum: usize = lengths.iter().sum();

        Self {
            total,
            average_chars: if total > 0 { sum / total } else { 0 },
            longest_chars: lengths.into_iter().max().unwrap_or(0),
        }
    }
}
