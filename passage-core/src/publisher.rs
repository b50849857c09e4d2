//! Cyclic publishing: one passage per run, wrapping after the last.

use crate::error::{PassageError, Result};
use crate::passage::Passage;
use crate::progress::ProgressStore;
use crate::sink::{DisplaySink, Post};

const ELLIPSIS: &str = "...";

/// Rotates through a fixed passage sequence using an injected progress store.
pub struct Publisher<P, S> {
    passages: Vec<Passage>,
    progress: P,
    sink: S,
    max_characters: usize,
}

impl<P: ProgressStore, S: DisplaySink> Publisher<P, S> {
    pub fn new(passages: Vec<Passage>, progress: P, sink: S, max_characters: usize) -> Self {
        Self {
            passages,
            progress,
            sink,
            max_characters,
        }
    }

    /// Emit the passage after the last one shown and record it.
    ///
    /// The marker is written only after the sink accepted the passage, so a
    /// failed run is retried with the same index next time.
    pub fn publish_next(&mut self) -> Result<Post> {
        if self.passages.is_empty() {
            return Err(PassageError::EmptyStore);
        }

        let last = self.progress.read()?;
        let index = next_index(last, self.passages.len());
        log::debug!("Last shown: {:?}, next: {}", last, index);

        let passage = &self.passages[index];
        let post = Post {
            index,
            total: self.passages.len(),
            book: passage.book.clone(),
            chapter: passage.chapter.clone(),
            part: passage.part.clone(),
            text: clip_text(&passage.text, self.max_characters),
        };
        if post.text.len() != passage.text.len() {
            log::warn!(
                "Passage {} exceeds {} characters, clipped for display",
                index + 1,
                self.max_characters
            );
        }

        self.sink.emit(&post)?;
        log::debug!(
            "Emitted passage {}/{} via {} sink",
            index + 1,
            post.total,
            self.sink.name()
        );

        self.progress.write(index)?;
        Ok(post)
    }

    pub fn progress(&self) -> &P {
        &self.progress
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

/// Index following `last`, wrapping to 0 past the end.
///
/// A marker beyond the end (the store shrank since it was written) also
/// wraps to 0.
pub fn next_index(last: Option<usize>, len: usize) -> usize {
    last.and_then(|i| i.checked_add(1))
        .filter(|&next| next < len)
        .unwrap_or(0)
}

/// Clip `text` to at most `max_chars` characters, ellipsis included.
///
/// A cut that would split a word backs off to the preceding space.
pub fn clip_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let cut = text.char_indices().nth(keep).map_or(text.len(), |(i, _)| i);
    let mut head = &text[..cut];

    let splits_word = text[cut..].starts_with(|c: char| !c.is_whitespace())
        && head.ends_with(|c: char| !c.is_whitespace());
    if splits_word {
        if let Some(space) = head.rfind(' ').filter(|&i| i > 0) {
            head = &head[..space];
        }
    }

    format!("{}{}", head.trim_end(), ELLIPSIS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::MemoryProgressStore;
    use crate::sink::MemorySink;

    const MAX: usize = 824;

    fn three_passages() -> Vec<Passage> {
        vec![
            Passage::new("BOOK I", "CHAPTER I", "Thucydides, an Athenian, wrote the history."),
            Passage::new("BOOK I", "CHAPTER II", "Now the country was formerly unsettled.").with_part(1, 2),
            Passage::new("BOOK I", "CHAPTER II", "For there was no commerce.").with_part(2, 2),
        ]
    }

    /// Accepts reads but drops every write, as if the process died first.
    struct CrashBeforeWrite(Option<usize>);

    impl ProgressStore for CrashBeforeWrite {
        fn read(&self) -> Result<Option<usize>> {
            Ok(self.0)
        }

        fn write(&mut self, _index: usize) -> Result<()> {
            Err(PassageError::Io(std::io::Error::other("killed")))
        }
    }

    #[test]
    fn test_next_index() {
        assert_eq!(next_index(None, 3), 0);
        assert_eq!(next_index(Some(0), 3), 1);
        assert_eq!(next_index(Some(1), 3), 2);
        assert_eq!(next_index(Some(2), 3), 0);
        assert_eq!(next_index(Some(40), 3), 0);
        assert_eq!(next_index(Some(0), 1), 0);
        assert_eq!(next_index(Some(usize::MAX), 3), 0);
    }

    #[test]
    fn test_three_passage_scenario() {
        let mut publisher =
            Publisher::new(three_passages(), MemoryProgressStore::new(), MemorySink::new(), MAX);

        let indices: Vec<usize> = (0..4).map(|_| publisher.publish_next().unwrap().index).collect();
        assert_eq!(indices, vec![0, 1, 2, 0]);
        assert_eq!(publisher.progress().writes(), &[0, 1, 2, 0]);
        assert_eq!(publisher.sink().emitted().len(), 4);
    }

    #[test]
    fn test_rotation_wraps_exactly_once() {
        let n = 7;
        let passages: Vec<Passage> = (0..n)
            .map(|i| Passage::new("BOOK I", format!("CHAPTER {}", i), "text"))
            .collect();
        let mut publisher =
            Publisher::new(passages, MemoryProgressStore::new(), MemorySink::new(), MAX);

        let indices: Vec<usize> = (0..=n).map(|_| publisher.publish_next().unwrap().index).collect();
        let mut expected: Vec<usize> = (0..n).collect();
        expected.push(0);
        assert_eq!(indices, expected);
    }

    #[test]
    fn test_resumes_from_marker() {
        let mut publisher = Publisher::new(
            three_passages(),
            MemoryProgressStore::starting_at(2),
            MemorySink::new(),
            MAX,
        );
        let post = publisher.publish_next().unwrap();
        assert_eq!(post.index, 0);
        assert_eq!(post.total, 3);
    }

    #[test]
    fn test_oversized_marker_wraps_to_start() {
        let mut publisher = Publisher::new(
            three_passages(),
            MemoryProgressStore::starting_at(usize::MAX),
            MemorySink::new(),
            MAX,
        );
        assert_eq!(publisher.publish_next().unwrap().index, 0);
        assert_eq!(publisher.progress().writes(), &[0]);
    }

    #[test]
    fn test_failed_write_retries_same_index() {
        let mut publisher =
            Publisher::new(three_passages(), CrashBeforeWrite(Some(0)), MemorySink::new(), MAX);

        assert!(publisher.publish_next().is_err());
        assert!(publisher.publish_next().is_err());

        let emitted = publisher.sink().emitted();
        assert_eq!(emitted.len(), 2);
        assert_eq!(emitted[0], emitted[1]);
        assert_eq!(emitted[0].index, 1);
        assert_eq!(emitted[0].part.as_deref(), Some("1/2"));
    }

    #[test]
    fn test_failed_emit_leaves_marker() {
        let mut publisher = Publisher::new(
            three_passages(),
            MemoryProgressStore::starting_at(1),
            MemorySink::always_fails("network down"),
            MAX,
        );

        assert!(matches!(publisher.publish_next(), Err(PassageError::Sink(_))));
        assert_eq!(publisher.progress().read().unwrap(), Some(1));
        assert!(publisher.progress().writes().is_empty());
    }

    #[test]
    fn test_empty_store_is_an_error() {
        let mut publisher =
            Publisher::new(Vec::new(), MemoryProgressStore::new(), MemorySink::new(), MAX);

        assert!(matches!(publisher.publish_next(), Err(PassageError::EmptyStore)));
        assert!(publisher.sink().emitted().is_empty());
        assert!(publisher.progress().writes().is_empty());
    }

    #[test]
    fn test_full_length_chunk_emitted_unclipped() {
        let text = format!("{}.", "x".repeat(810));
        assert_eq!(text.chars().count(), 811);
        let passages = vec![Passage::new("BOOK I", "CHAPTER I", text.as_str()).with_part(1, 2)];
        let mut publisher =
            Publisher::new(passages, MemoryProgressStore::new(), MemorySink::new(), MAX);

        let post = publisher.publish_next().unwrap();
        assert_eq!(post.text, text);
        assert!(!post.text.ends_with("..."));
        assert_eq!(publisher.sink().emitted()[0].text, text);
    }

    #[test]
    fn test_oversized_text_clipped_to_budget() {
        let text = "word ".repeat(400);
        let passages = vec![Passage::new("BOOK VIII", "CHAPTER CIX", text.trim_end())];
        let mut publisher =
            Publisher::new(passages, MemoryProgressStore::new(), MemorySink::new(), MAX);

        let post = publisher.publish_next().unwrap();
        assert!(post.text.chars().count() <= MAX);
        assert!(post.text.ends_with("..."));
    }

    #[test]
    fn test_clip_short_text_unchanged() {
        assert_eq!(clip_text("Short text.", 824), "Short text.");
    }

    #[test]
    fn test_clip_backs_off_mid_word() {
        let clipped = clip_text("alpha beta gamma delta", 14);
        assert_eq!(clipped, "alpha beta...");
        assert!(clipped.chars().count() <= 14);
    }

    #[test]
    fn test_clip_on_word_boundary() {
        assert_eq!(clip_text("alpha beta gamma", 9), "alpha...");
    }

    #[test]
    fn test_clip_single_long_token() {
        let clipped = clip_text(&"x".repeat(30), 10);
        assert_eq!(clipped, "xxxxxxx...");
    }

    #[test]
    fn test_clip_counts_characters_not_bytes() {
        let clipped = clip_text("αβγδ αβγδ αβγδ", 10);
        assert_eq!(clipped, "αβγδ...");
        assert!(clipped.chars().count() <= 10);
    }
}
