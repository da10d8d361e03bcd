//! Minutes Extractor
//!
//! Reads structure that is already written down in meeting text.
//!
//! # Overview
//!
//! Three independent extractors share this crate. None of them infers
//! anything; they only recognize explicit markers:
//!
//! - **User stories**: `As a <persona>, I want <capability> so that <benefit>`
//!   lines plus the `AC:` or bullet lines right below them
//! - **Gherkin**: `Feature:` / `Scenario:` / `Given` / `When` / `Then`
//!   blocks, read with a small line-driven state machine
//! - **Meeting signals**: lines opening with `Decision:`, `Action item:`,
//!   `Risk:` and friends, classified by an ordered [`RuleSet`]
//!
//! Every result records where it came from as 1-based line spans, and every
//! extractor degrades to "nothing found" plus human-readable gaps instead of
//! failing. Only tenant rule configuration can produce an error.
//!
//! # Architecture
//!
//! ```text
//! Text → to_lines → Extractor → Envelope { tenantId?, payload, gaps }
//!                      ↑
//!        SignalCatalog → compile_rules → RuleSet
//! ```
//!
//! # Example Usage
//!
//! ```
//! use minutes_extractor::{extract_meeting_signals, SignalType};
//!
//! let result = extract_meeting_signals("Decision: Use stdio as default transport.", None, None);
//!
//! assert_eq!(result.signals.len(), 1);
//! assert_eq!(result.signals[0].signal_type, SignalType::Decision);
//! ```

#![warn(missing_docs)]

mod catalog;
mod error;
mod gherkin;
mod rules;
mod signals;
mod types;
mod user_story;


pub use catalog::{compile_rules, CatalogVersion, RuleSpec, SignalCatalog};
pub use error::ExtractorError;
pub use gherkin::{extract_gherkin, IMPLICIT_FEATURE_NAME};
pub use rules::{compile_pattern, RuleSet, SignalRule};
pub use signals::{extract_meeting_signals, SignalExtractor};
pub use types::{
    ExtractedUserStory, GherkinExtraction, GherkinFeature, GherkinScenario, MeetingSignal,
    MeetingSignals, SignalType, UserStoryExtraction,
};
pub use user_story::extract_user_stories;
