//! Minutes Domain Layer
//!
//! Value types shared by every Minutes crate. Nothing in here performs I/O
//! or keeps state between calls.
//!
//! ## Key Concepts
//!
//! - **Line**: transcripts are normalized into an ordered sequence of lines;
//!   line numbers are 1-based
//! - **Source Span**: an inclusive line range locating a fact in the input
//! - **Evidence**: a quoted sentence plus the spans it came from
//! - **Confidence**: coarse low/medium/high reliability tag
//!
//! ## Architecture
//!
//! This crate sits at the bottom of the workspace:
//! - The extractor and synthesizer crates depend on it
//! - It depends on `serde` only, so every record can be serialized

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod confidence;
pub mod evidence;
pub mod span;
pub mod text;

// Re-exports for convenience
pub use confidence::Confidence;
pub use evidence::Evidence;
pub use span::SourceSpan;
pub use text::{collapse_whitespace, is_blank, to_lines};
