//! Line sanitization for plain-text sources.

/// Invisible characters that leak in from BOM-prefixed or web-scraped text.
const INVISIBLE_CHARS: &[char] = &[
    '\u{feff}', // BOM
    '\u{200b}', // Zero-width space
    '\u{200c}', // Zero-width non-joiner
    '\u{200d}', // Zero-width joiner
    '\u{2060}', // Word joiner
];

/// Clean a single source line.
///
/// This function:
/// - Drops byte-order marks and zero-width characters
/// - Drops control characters
/// - Turns tabs and non-breaking spaces into plain spaces
/// - Collapses runs of spaces and trims both ends
pub fn clean_line(line: &str) -> String {
    let mut result = String::with_capacity(line.len());
    let mut prev_was_space = false;

    for c in line.chars() {
        let c = match c {
            '\t' | '\u{00a0}' => ' ',
            c if INVISIBLE_CHARS.contains(&c) || c.is_control() => continue,
            c => c,
        };

        if c == ' ' {
            if !prev_was_space {
                result.push(' ');
            }
            prev_was_space = true;
        } else {
            result.push(c);
            prev_was_space = false;
        }
    }

    result.trim().to_string()
}
