//! Classification of source lines into structural markers and content.

use once_cell::sync::Lazy;
use regex::Regex;

static BOOK_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^BOOK [IVXLCDM]+$").expect("book marker pattern should compile"));

static CHAPTER_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^CHAPTER [IVXLCDM]+$").expect("chapter marker pattern should compile")
});

/// What a cleaned source line means to the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass<'a> {
    /// Starts a new book; carries the label, e.g. "BOOK III"
    BookMarker(&'a str),
    /// Starts a new chapter; carries the label, e.g. "CHAPTER XII"
    ChapterMarker(&'a str),
    /// Prose, or an empty string for a paragraph break
    ContentLine(&'a str),
}

/// Decides which lines are structural markers.
///
/// Implementations see lines that are already cleaned and trimmed.
pub trait LineClassifier {
    fn classify<'a>(&self, line: &'a str) -> LineClass<'a>;
}

/// Upper-case `BOOK <roman>` / `CHAPTER <roman>` lines, nothing else on the line.
///
/// The numeral is matched as a shape only; its value is never computed.
#[derive(Debug, Default, Clone, Copy)]
pub struct RomanMarkerClassifier;

impl LineClassifier for RomanMarkerClassifier {
    fn classify<'a>(&self, line: &'a str) -> LineClass<'a> {
        if BOOK_MARKER.is_match(line) {
            LineClass::BookMarker(line)
        } else if CHAPTER_MARKER.is_match(line) {
            LineClass::ChapterMarker(line)
        } else {
            LineClass::ContentLine(line)
        }
    }
}
