//! Line normalization for transcript text
//!
//! Every extractor works on the same line sequence so spans produced by
//! different components always agree on line numbers.

/// Normalize line endings and split into lines
///
/// `\r\n` and lone `\r` both become `\n`. The result always contains at
/// least one (possibly empty) line; index `i` is line number `i + 1`.
pub fn to_lines(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .split('\n')
        .map(str::to_string)
        .collect()
}

/// Whether a line holds nothing but whitespace
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Collapse runs of whitespace to a single space and trim
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
