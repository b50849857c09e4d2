// Source text parsing: book/chapter structure into passages

use passage_core::{Passage, PassageError};

use crate::text::{LineClass, LineClassifier, clean_line, process_chapter};

/// Label of the marker that opens the body of the work.
const FIRST_BOOK: &str = "BOOK I";

/// Scanner state: labels carried forward plus the lines of the open chapter
struct SourceParser<'c, C> {
    classifier: &'c C,
    max_chars: usize,
    book: Option<String>,
    chapter: Option<String>,
    pending: Vec<String>,
    passages: Vec<Passage>,
}

impl<'c, C: LineClassifier> SourceParser<'c, C> {
    fn new(classifier: &'c C, max_chars: usize) -> Self {
        Self {
            classifier,
            max_chars,
            book: None,
            chapter: None,
            pending: Vec::new(),
            passages: Vec::new(),
        }
    }

    fn feed(&mut self, line: &str) {
        match self.classifier.classify(line) {
            LineClass::BookMarker(label) => {
                self.flush();
                self.book = Some(label.to_string());
            }
            LineClass::ChapterMarker(label) => {
                self.flush();
                self.chapter = Some(label.to_string());
            }
            LineClass::ContentLine(text) => {
                if self.book.is_none() || self.chapter.is_none() {
                    return;
                }
                // Leading blank lines carry no paragraph break
                if text.is_empty() && self.pending.is_empty() {
                    return;
                }
                self.pending.push(text.to_string());
            }
        }
    }

    /// Run the open chapter through the chunker and start a fresh one.
    fn flush(&mut self) {
        let lines = std::mem::take(&mut self.pending);
        let (Some(book), Some(chapter)) = (&self.book, &self.chapter) else {
            return;
        };
        if lines.is_empty() {
            return;
        }

        let passages = process_chapter(book, chapter, &lines, self.max_chars);
        log::debug!("{} {}: {} passage(s)", book, chapter, passages.len());
        self.passages.extend(passages);
    }

    fn finish(mut self) -> Vec<Passage> {
        self.flush();
        self.passages
    }
}

/// Parse the full source text into passages of at most `max_chars` characters.
///
/// Everything before the first `BOOK I` line is front matter and ignored.
pub fn parse_source<C: LineClassifier>(
    content: &str,
    classifier: &C,
    max_chars: usize,
) -> Result<Vec<Passage>, PassageError> {
    let lines: Vec<String> = content.lines().map(clean_line).collect();

    let start = lines
        .iter()
        .position(|line| classifier.classify(line) == LineClass::BookMarker(FIRST_BOOK))
        .ok_or_else(|| {
            PassageError::MalformedSource(format!("could not find the beginning of {}", FIRST_BOOK))
        })?;
    log::debug!("Front matter: {} line(s) skipped", start);

    let mut parser = SourceParser::new(classifier, max_chars);
    for line in &lines[start..] {
        parser.feed(line);
    }

    let passages = parser.finish();
    if passages.is_empty() {
        return Err(PassageError::MalformedSource(
            "no chapter text found after the first book marker".to_string(),
        ));
    }

    Ok(passages)
}
