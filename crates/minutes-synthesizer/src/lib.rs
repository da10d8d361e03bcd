//! Minutes Synthesizer
//!
//! Infers user stories and Gherkin scenarios from plain meeting talk when
//! nobody wrote them down explicitly.
//!
//! # Overview
//!
//! Synthesis is a two-step pipeline:
//!
//! 1. **Mining** pulls requirement sentences ("agents need to ...",
//!    "results must ...") out of the transcript, stripping speaker labels
//!    and filler words while keeping the original sentence as evidence
//! 2. **Synthesis** runs each requirement through ordered heuristic
//!    templates built on the intent-parsing detectors (lockout, latency,
//!    visibility, invalid input, ...)
//!
//! Everything produced here is a guess, so every story and scenario carries
//! `low` confidence plus the evidence it was derived from.
//!
//! # Architecture
//!
//! ```text
//! Text → mine_requirements → [MinedRequirement] → synthesize_user_stories
//!                                               → synthesize_gherkin
//! ```
//!
//! The [`Synthesizer`] facade wires both steps together and handles mode
//! selection. Envelopes carry `modeUsed` so an external LLM-backed path can
//! return the same shapes.
//!
//! # Example Usage
//!
//! ```
//! use minutes_synthesizer::{Synthesizer, SynthesizerConfig};
//!
//! let synthesizer = Synthesizer::new(SynthesizerConfig::deterministic()).unwrap();
//! let result = synthesizer.synthesize_gherkin(
//!     "Searches lock for 15 minutes after 5 failed login attempts, so admins must review lockouts.",
//!     None,
//!     None,
//! );
//!
//! println!("Scenarios: {}", result.features[0].scenarios.len());
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod gherkin;
mod intent;
mod miner;
mod synthesizer;
mod types;
mod user_story;

pub use config::{
    clamp_max_items, SynthesisMode, SynthesizerConfig, DEFAULT_FEATURE_NAME, DEFAULT_MAX_ITEMS,
    MAX_ITEMS_LIMIT,
};
pub use error::SynthesizerError;
pub use gherkin::synthesize_gherkin;
pub use intent::{
    capability_from_requirement, capability_from_requirement_basic, extract_benefit,
    extract_invalid_thing, extract_lockout, extract_only_constraint, extract_performance,
    extract_visibility_constraint, infer_persona, infer_persona_basic, is_audit_requirement,
    is_display_capability, is_only_assigned_visibility, is_view_but_not_edit, mentions_results,
    normalize_capability, shown_object, split_but_not_constraint, split_inline_constraint,
    to_sentence, CapabilitySplit, LockoutConstraint, PerformanceConstraint, VisibilityConstraint,
};
pub use miner::{is_requirement_like, mine_requirements};
pub use synthesizer::Synthesizer;
pub use types::{
    GherkinSynthesis, MinedRequirement, ModeUsed, RequirementMining, SynthesizedGherkinFeature,
    SynthesizedGherkinScenario, SynthesizedUserStory, UserStorySynthesis,
};
pub use user_story::synthesize_user_stories;
