//! Evidence linking synthesized statements back to the transcript

use crate::span::SourceSpan;
use serde::{Deserialize, Serialize};

/// A verbatim quote plus where it was found
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    /// Original sentence, before any cleaning
    pub quote: String,

    /// Never empty
    pub spans: Vec<SourceSpan>,
}

impl Evidence {
    /// Evidence for a quote taken from a single line
    pub fn from_line(quote: impl Into<String>, line: usize) -> Self {
        Self {
            quote: quote.into(),
            spans: vec![SourceSpan::single(line)],
        }
    }
}
