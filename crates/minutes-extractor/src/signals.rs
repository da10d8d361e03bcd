//! Meeting signal extraction
//!
//! Keyword rules classify individual lines as decisions, action items,
//! risks, dependencies or open questions. Each line yields at most one
//! signal.

use crate::catalog::compile_rules;
use crate::error::ExtractorError;
use crate::rules::{default_rules, RuleSet};
use crate::types::{MeetingSignal, MeetingSignals, SignalType};
use minutes_domain::{to_lines, SourceSpan};
use serde_json::Value;
use tracing::debug;

/// Suggestions emitted once per observed signal type, in this order
const SUGGESTIONS: [(SignalType, &str); 3] = [
    (
        SignalType::ActionItem,
        "Assign each ActionItem an owner and due date.",
    ),
    (
        SignalType::Decision,
        "Record each Decision with rationale and impacted systems.",
    ),
    (
        SignalType::OpenQuestion,
        "Convert OpenQuestions into tracked follow-ups with owners.",
    ),
];

const NO_SIGNALS_SUGGESTION: &str =
    r#"No signals detected; consider adding explicit markers like "Decision:" and "Action item:" in notes."#;

/// Extract meeting signals
///
/// `rules` replaces the built-in rule set entirely when given.
pub fn extract_meeting_signals(
    text: &str,
    tenant_id: Option<&str>,
    rules: Option<&RuleSet>,
) -> MeetingSignals {
    let rules = rules.unwrap_or_else(|| default_rules());
    let lines = to_lines(text);

    let mut signals = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(rule) = rules.classify(trimmed) {
            signals.push(MeetingSignal {
                signal_type: rule.signal_type,
                confidence: rule.confidence,
                text: trimmed.to_string(),
                span: SourceSpan::single(idx + 1),
            });
        }
    }

    let mut suggested_actions: Vec<String> = SUGGESTIONS
        .iter()
        .filter(|(kind, _)| signals.iter().any(|s| s.signal_type == *kind))
        .map(|(_, suggestion)| suggestion.to_string())
        .collect();

    if signals.is_empty() {
        suggested_actions.push(NO_SIGNALS_SUGGESTION.to_string());
    }

    debug!(
        "Extracted {} meeting signals using {} rules",
        signals.len(),
        rules.len()
    );

    MeetingSignals {
        tenant_id: tenant_id.map(str::to_string),
        signals,
        suggested_actions,
    }
}

/// Signal extractor bound to one rule set
///
/// Holds the tenant's compiled rules so repeated calls skip compilation.
#[derive(Debug, Clone, Default)]
pub struct SignalExtractor {
    rules: RuleSet,
}

impl SignalExtractor {
    /// Create an extractor over the given rules
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Create an extractor from a tenant catalog document
    ///
    /// Falls back to the built-in rules when the document is absent,
    /// off-schema or empty. A malformed pattern is an error.
    pub fn for_catalog(document: Option<&Value>) -> Result<Self, ExtractorError> {
        let rules = compile_rules(document)?.unwrap_or_default();
        Ok(Self::new(rules))
    }

    /// Rules in use
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Extract signals from text
    pub fn extract(&self, text: &str, tenant_id: Option<&str>) -> MeetingSignals {
        extract_meeting_signals(text, tenant_id, Some(&self.rules))
    }
}
