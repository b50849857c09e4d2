//! Splitting chapter text into bounded-length passages.

use passage_core::Passage;

/// Characters held back when no boundary exists and the window is hard-cut.
const HARD_CUT_RESERVE: usize = 3;

/// Clause-level breaks, tried in order once no sentence break is found.
const CLAUSE_BREAKS: &[&str] = &["; ", "! ", "? ", ", "];

/// Join source lines into paragraphs separated by a blank line.
///
/// Consecutive non-blank lines join with a single space; a blank line ends
/// the current paragraph.
pub fn assemble_paragraphs<S: AsRef<str>>(lines: &[S]) -> String {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in lines {
        let line = line.as_ref().trim();
        if !line.is_empty() {
            current.push(line);
        } else if !current.is_empty() {
            paragraphs.push(current.join(" "));
            current.clear();
        }
    }

    if !current.is_empty() {
        paragraphs.push(current.join(" "));
    }

    paragraphs.join("\n\n")
}

/// Split text into segments of at most `max_chars` characters.
///
/// Each cut is made at the last sentence break in the window, else the last
/// clause break, else the last space. A window with none of those is
/// hard-cut `HARD_CUT_RESERVE` characters short of the limit.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let hard_cut = max_chars.saturating_sub(HARD_CUT_RESERVE).max(1);
    let mut segments = Vec::new();
    let mut rest = text.trim();

    while let Some(window_end) = char_offset(rest, max_chars) {
        let window = &rest[..window_end];
        let cut = find_break(window)
            .or_else(|| char_offset(rest, hard_cut))
            .unwrap_or(rest.len());

        segments.push(rest[..cut].to_string());
        rest = rest[cut..].trim_start();
    }

    if !rest.is_empty() {
        segments.push(rest.to_string());
    }

    segments
}

/// Byte offset of the segment end inside `window`, if it holds a break.
fn find_break(window: &str) -> Option<usize> {
    if let Some(i) = window.rfind(". ") {
        return Some(i + 1);
    }

    for delimiter in CLAUSE_BREAKS {
        if let Some(i) = window.rfind(delimiter) {
            return Some(i + 1);
        }
    }

    window.rfind(' ').filter(|&i| i > 0)
}

/// Byte offset of the `n`th character, or `None` when `text` has at most
/// `n` characters.
fn char_offset(text: &str, n: usize) -> Option<usize> {
    text.char_indices().nth(n).map(|(i, _)| i)
}

/// Turn a chapter's raw lines into tagged passages.
///
/// A chapter that fits in one segment gets no `part`; otherwise every
/// segment is tagged "i/n". Empty chapters produce nothing.
pub fn process_chapter<S: AsRef<str>>(
    book: &str,
    chapter: &str,
    lines: &[S],
    max_chars: usize,
) -> Vec<Passage> {
    let text = assemble_paragraphs(lines);
    let segments = chunk_text(&text, max_chars);
    let total = segments.len();

    if total > 1 {
        log::debug!("{} {} split into {} parts", book, chapter, total);
    }

    segments
        .into_iter()
        .enumerate()
        .map(|(i, segment)| {
            let passage = Passage::new(book, chapter, segment);
            if total > 1 {
                passage.with_part(i + 1, total)
            } else {
                passage
            }
        })
        .collect()
}
