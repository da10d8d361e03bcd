//! Meeting signal rules
//!
//! A [`RuleSet`] is an ordered list: the first rule with any matching
//! pattern classifies the line, so reordering rules changes output.

use crate::error::ExtractorError;
use crate::types::SignalType;
use minutes_domain::Confidence;
use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

/// Built-in rules, in tie-break order
const DEFAULT_RULE_PATTERNS: [(SignalType, Confidence, &str); 5] = [
    (
        SignalType::Decision,
        Confidence::High,
        r"^\s*(decision|decided|we decided|final decision)\s*[:\-]",
    ),
    (
        SignalType::ActionItem,
        Confidence::High,
        r"^\s*(action item|ai|todo|to do|next step)\s*[:\-]",
    ),
    (
        SignalType::OpenQuestion,
        Confidence::High,
        r"^\s*(question|open question|unknown)\s*[:\-]",
    ),
    (
        SignalType::Risk,
        Confidence::Medium,
        r"^\s*(risk|concern|blocker|issue)\s*[:\-]",
    ),
    (
        SignalType::Dependency,
        Confidence::Medium,
        r"^\s*(dependency|depends on|waiting on)\s*[:\-]",
    ),
];

static DEFAULT_RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    let rules = DEFAULT_RULE_PATTERNS
        .iter()
        .map(|(signal_type, confidence, pattern)| {
            let regex = RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .expect("Invalid default signal pattern");
            SignalRule::new(*signal_type, *confidence, vec![regex])
        })
        .collect();
    RuleSet::new(rules)
});

static SLASH_LITERAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^/(.*)/([a-z]*)$").expect("Invalid slash literal pattern")
});

/// One classification rule
#[derive(Debug, Clone)]
pub struct SignalRule {
    /// Type assigned to matching lines
    pub signal_type: SignalType,

    /// Confidence assigned to matching lines
    pub confidence: Confidence,

    /// A line matches when any pattern matches its trimmed text
    pub patterns: Vec<Regex>,
}

impl SignalRule {
    /// Create a rule
    pub fn new(signal_type: SignalType, confidence: Confidence, patterns: Vec<Regex>) -> Self {
        Self {
            signal_type,
            confidence,
            patterns,
        }
    }

    /// Whether any pattern matches the (already trimmed) line
    pub fn matches(&self, line: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(line))
    }
}

/// Ordered rule list used by the signal extractor
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<SignalRule>,
}

impl RuleSet {
    /// Create a rule set; order is tie-break priority
    pub fn new(rules: Vec<SignalRule>) -> Self {
        Self { rules }
    }

    /// The built-in rule set
    pub fn defaults() -> Self {
        DEFAULT_RULES.clone()
    }

    /// Rules in priority order
    pub fn rules(&self) -> &[SignalRule] {
        &self.rules
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set has no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First rule matching the trimmed line
    pub fn classify(&self, line: &str) -> Option<&SignalRule> {
        self.rules.iter().find(|rule| rule.matches(line))
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Shared handle to the built-in rules
pub(crate) fn default_rules() -> &'static RuleSet {
    &DEFAULT_RULES
}

/// Compile a rule pattern string
///
/// `/body/flags` compiles `body` with the given flags (`i`, `m`, `s`, `x`;
/// `d`, `g`, `u` and `y` are accepted and have no effect). Any other string
/// compiles case-insensitive.
pub fn compile_pattern(pattern: &str) -> Result<Regex, ExtractorError> {
    let malformed = |reason: String| ExtractorError::MalformedPattern {
        pattern: pattern.to_string(),
        reason,
    };

    let Some(caps) = SLASH_LITERAL_REGEX.captures(pattern) else {
        return RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| malformed(e.to_string()));
    };

    let body = caps.get(1).map_or("", |m| m.as_str());
    let flags = caps.get(2).map_or("", |m| m.as_str());

    let mut builder = RegexBuilder::new(body);
    for flag in flags.chars() {
        match flag {
            'i' => builder.case_insensitive(true),
            'm' => builder.multi_line(true),
            's' => builder.dot_matches_new_line(true),
            'x' => builder.ignore_whitespace(true),
            'd' | 'g' | 'u' | 'y' => &mut builder,
            other => return Err(malformed(format!("unsupported flag '{}'", other))),
        };
    }

    builder.build().map_err(|e| malformed(e.to_string()))
}
