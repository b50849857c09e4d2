//! Destinations for published passages.

use std::io::{self, Write};

use crate::error::{PassageError, Result};

const SEPARATOR_WIDTH: usize = 40;

/// One passage as handed to a sink.
///
/// `text` is the bounded payload; the labels are metadata a sink may use
/// to decorate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// 0-based index of the passage in the store
    pub index: usize,
    /// Number of passages in the store
    pub total: usize,
    pub book: String,
    pub chapter: String,
    pub part: Option<String>,
    /// Passage text, at most the configured character budget
    pub text: String,
}

/// Trait for anything that can receive one passage per run
pub trait DisplaySink {
    /// Deliver a post
    fn emit(&mut self, post: &Post) -> Result<()>;

    /// Get the sink name for logging
    fn name(&self) -> &'static str;
}

/// Prints passages to standard output, framed with a title and heading
#[derive(Debug, Clone)]
pub struct ConsoleSink {
    title: String,
}

impl ConsoleSink {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into() }
    }
}

impl DisplaySink for ConsoleSink {
    fn emit(&mut self, post: &Post) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        writeln!(out, "{}", frame_post(post, &self.title))?;
        out.flush()?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "console"
    }
}

/// Console layout: title, separator, heading with the 1-based passage
/// number, the text, closing separator.
pub fn frame_post(post: &Post, title: &str) -> String {
    let separator = "-".repeat(SEPARATOR_WIDTH);
    let heading = match &post.part {
        Some(part) => format!(
            "{} - {} (Passage {}, part {})",
            post.book,
            post.chapter,
            post.index + 1,
            part
        ),
        None => format!("{} - {} (Passage {})", post.book, post.chapter, post.index + 1),
    };

    format!("\n{}\n{}\n{}\n\n{}\n{}", title, separator, heading, post.text, separator)
}

/// Collects emitted posts in memory.
///
/// Can be told to fail, to simulate a post that never went out.
#[derive(Debug, Default)]
pub struct MemorySink {
    emitted: Vec<Post>,
    fail_with: Option<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose every emit fails with `message`
    pub fn always_fails(message: &str) -> Self {
        Self {
            emitted: Vec::new(),
            fail_with: Some(message.to_string()),
        }
    }

    pub fn emitted(&self) -> &[Post] {
        &self.emitted
    }
}

impl DisplaySink for MemorySink {
    fn emit(&mut self, post: &Post) -> Result<()> {
        if let Some(message) = &self.fail_with {
            return Err(PassageError::Sink(message.clone()));
        }
        self.emitted.push(post.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(index: usize, part: Option<&str>, text: &str) -> Post {
        Post {
            index,
            total: 10,
            book: "BOOK I".to_string(),
            chapter: "CHAPTER IV".to_string(),
            part: part.map(str::to_string),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_frame_layout() {
        let framed = frame_post(&post(3, None, "Minos is the first."), "Daily Thucydides Passage");
        let dashes = "-".repeat(40);
        assert_eq!(
            framed,
            format!(
                "\nDaily Thucydides Passage\n{d}\nBOOK I - CHAPTER IV (Passage 4)\n\nMinos is the first.\n{d}",
                d = dashes
            )
        );
    }

    #[test]
    fn test_frame_shows_part() {
        let framed = frame_post(&post(0, Some("2/3"), "text"), "Title");
        assert!(framed.contains("BOOK I - CHAPTER IV (Passage 1, part 2/3)"));
    }

    #[test]
    fn test_frame_never_shortens_text() {
        let text = "word ".repeat(164);
        let framed = frame_post(&post(0, Some("1/2"), text.trim_end()), "Title");
        assert!(framed.contains(text.trim_end()));
    }

    #[test]
    fn test_memory_sink_collects() {
        let mut sink = MemorySink::new();
        sink.emit(&post(0, None, "one")).unwrap();
        sink.emit(&post(1, None, "two")).unwrap();

        let texts: Vec<&str> = sink.emitted().iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two"]);
    }

    #[test]
    fn test_memory_sink_failure() {
        let mut sink = MemorySink::always_fails("offline");
        let err = sink.emit(&post(0, None, "one")).unwrap_err();
        assert!(matches!(err, PassageError::Sink(ref m) if m == "offline"));
        assert!(sink.emitted().is_empty());
    }
}
