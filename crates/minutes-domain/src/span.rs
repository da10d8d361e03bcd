//! Source spans - locating facts in the normalized line sequence

use serde::{Deserialize, Serialize};

/// Inclusive, 1-based line range into the normalized input
///
/// Serialized as `{"kind": "line-range", "startLine": .., "endLine": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename = "line-range", rename_all = "camelCase")]
pub struct SourceSpan {
    /// First line (1-based)
    pub start_line: usize,
    /// Last line (1-based, inclusive)
    pub end_line: usize,
}

impl SourceSpan {
    /// Span covering exactly one line
    pub fn single(line: usize) -> Self {
        Self {
            start_line: line,
            end_line: line,
        }
    }

    /// Span covering `start..=end`
    ///
    /// `end` is raised to `start` when it falls before it, so the
    /// `start_line <= end_line` invariant always holds.
    pub fn range(start: usize, end: usize) -> Self {
        Self {
            start_line: start,
            end_line: end.max(start),
        }
    }

    /// Whether the span lies within an input of `line_count` lines
    pub fn fits(&self, line_count: usize) -> bool {
        self.start_line >= 1 && self.start_line <= self.end_line && self.end_line <= line_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_span() {
        let span = SourceSpan::single(4);
        assert_eq!(span.start_line, 4);
        assert_eq!(span.end_line, 4);
    }

    #[test]
    fn test_range_clamps_end() {
        let span = SourceSpan::range(7, 3);
        assert_eq!(span, SourceSpan::single(7));
    }

    #[test]
    fn test_fits() {
        assert!(SourceSpan::range(1, 3).fits(3));
        assert!(!SourceSpan::range(2, 4).fits(3));
        assert!(!SourceSpan::single(0).fits(3));
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_value(SourceSpan::range(2, 5)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "line-range", "startLine": 2, "endLine": 5})
        );

        let parsed: SourceSpan = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, SourceSpan::range(2, 5));
    }
}
