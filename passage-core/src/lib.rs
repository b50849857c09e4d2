//! Shared library for the daily-passage workspace
//!
//! Holds everything both phases agree on:
//! - the `Passage` record and its JSON store
//! - the progress marker behind the `ProgressStore` trait
//! - display sinks and the cyclic `Publisher`
//! - configuration and the error type

pub mod config;
pub mod error;
mod fsio;
pub mod passage;
pub mod progress;
pub mod publisher;
pub mod sink;

pub use config::{Config, DEFAULT_MAX_CHARACTERS};
pub use error::{PassageError, Result};
pub use passage::{Passage, PassageStats, load_passages, save_passages};
pub use progress::{JsonProgressStore, MemoryProgressStore, ProgressStore};
pub use publisher::{Publisher, clip_text, next_index};
pub use sink::{ConsoleSink, DisplaySink, MemorySink, Post, frame_post};
