//! Text processing: line cleaning, marker classification, chunking.

pub mod chunker;
pub mod classifier;
mod cleaner;

pub use chunker::process_chapter;
pub use classifier::{LineClass, LineClassifier, RomanMarkerClassifier};
pub use cleaner::clean_line;
