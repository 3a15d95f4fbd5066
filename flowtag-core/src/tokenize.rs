//! Line tokenizer shared by the lookup parser and the log classifier.

/// How a raw line is split into tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// Lookup files: `a, b ,c`
    Comma,
    /// Flow logs: runs of ASCII whitespace.
    Whitespace,
}

/// Splits a raw line into non-empty tokens.
///
/// The line is trimmed first; a line that is empty after trimming yields no
/// tokens at all, which callers treat as "skip this line".
pub fn split_line(line: &str, delimiter: Delimiter) -> Vec<&str> {
    let line = line.trim();
    if line.is_empty() {
        return Vec::new();
    }

    match delimiter {
        Delimiter::Comma => line
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .collect(),
        Delimiter::Whitespace => line.split_ascii_whitespace().collect(),
    }
}
