//! Persistence of the "last shown" marker.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use crate::error::Result;
use crate::fsio::write_json_atomic;

/// Storage for the index of the last published passage
pub trait ProgressStore {
    /// Index of the last passage shown, or `None` before the first run
    fn read(&self) -> Result<Option<usize>>;

    /// Record `index` as the last passage shown
    fn write(&mut self, index: usize) -> Result<()>;
}

/// On-disk layout: `{"last_index": 12}`
#[derive(Debug, Default, Serialize, Deserialize)]
struct ProgressDocument {
    #[serde(default)]
    last_index: Option<usize>,
}

/// Progress marker kept in a small JSON file.
///
/// A missing file means nothing has been shown yet.
#[derive(Debug, Clone)]
pub struct JsonProgressStore {
    path: PathBuf,
}

impl JsonProgressStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ProgressStore for JsonProgressStore {
    fn read(&self) -> Result<Option<usize>> {
        if !self.path.exists() {
            log::debug!("No progress file at {}", self.path.display());
            return Ok(None);
        }

        let file = File::open(&self.path)?;
        let doc: ProgressDocument = serde_json::from_reader(BufReader::new(file))?;
        Ok(doc.last_index)
    }

    fn write(&mut self, index: usize) -> Result<()> {
        write_json_atomic(&self.path, &ProgressDocument { last_index: Some(index) })
    }
}

/// In-memory progress marker for tests and dry runs
#[derive(Debug, Default, Clone)]
pub struct MemoryProgressStore {
    last_index: Option<usize>,
    writes: Vec<usize>,
}

impl MemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(last_index: usize) -> Self {
        Self {
            last_index: Some(last_index),
            writes: Vec::new(),
        }
    }

    /// Every index written so far, oldest first
    pub fn writes(&self) -> &[usize] {
        &self.writes
    }
}

impl ProgressStore for MemoryProgressStore {
    fn read(&self) -> Result<Option<usize>> {
        Ok(self.last_index)
    }

    fn write(&mut self, index: usize) -> Result<()> {
        self.last_index = Some(index);
        self.writes.push(index);
        Ok(())
    }
}
