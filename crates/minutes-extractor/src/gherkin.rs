//! Gherkin extraction
//!
//! A single pass over the normalized lines drives a three-state machine:
//!
//! ```text
//! Outside --Feature:--> InFeature --Scenario:--> InScenario
//!    |                     ^  |                     |
//!    +----Scenario:--------|--+ (implicit feature)  |
//!                          +------Feature:----------+ (closes both)
//! ```
//!
//! Pending `@tags` and the kind of the last step are carried beside the
//! state. A construct is frozen into its parent when the next header (or
//! the end of input) closes it.

use crate::types::{GherkinExtraction, GherkinFeature, GherkinScenario};
use minutes_domain::{is_blank, to_lines, SourceSpan};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Name given to a feature opened by a scenario with no preceding header
pub const IMPLICIT_FEATURE_NAME: &str = "Implicit Feature";

static FEATURE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^feature\s*:\s*(.+)$").expect("Invalid feature pattern"));

static SCENARIO_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(scenario|scenario outline)\s*:\s*(.+)$").expect("Invalid scenario pattern")
});

static BACKGROUND_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^background\s*:").expect("Invalid background pattern"));

static STEP_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(given|when|then|and|but)\s+").expect("Invalid step pattern")
});

/// Step buckets of a scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepKind {
    Given,
    When,
    Then,
}

/// What a step keyword asks for
enum StepKeyword {
    /// given / when / then
    Primary(StepKind),
    /// and / but
    Continuation,
}

impl StepKeyword {
    fn parse(keyword: &str) -> Option<Self> {
        match keyword.to_lowercase().as_str() {
            "given" => Some(StepKeyword::Primary(StepKind::Given)),
            "when" => Some(StepKeyword::Primary(StepKind::When)),
            "then" => Some(StepKeyword::Primary(StepKind::Then)),
            "and" | "but" => Some(StepKeyword::Continuation),
            _ => None,
        }
    }
}

struct OpenFeature {
    feature: GherkinFeature,
    start_line: usize,
}

impl OpenFeature {
    fn new(name: &str, start_line: usize) -> Self {
        Self {
            feature: GherkinFeature {
                name: name.to_string(),
                description: None,
                scenarios: Vec::new(),
                spans: Vec::new(),
            },
            start_line,
        }
    }

    fn append_description(&mut self, line: &str) {
        match &mut self.feature.description {
            Some(description) => {
                description.push('\n');
                description.push_str(line);
            }
            None => self.feature.description = Some(line.to_string()),
        }
    }

    fn finish(mut self, end_line: usize) -> GherkinFeature {
        self.feature.spans = vec![SourceSpan::range(self.start_line, end_line)];
        self.feature
    }
}

struct OpenScenario {
    scenario: GherkinScenario,
    start_line: usize,
}

impl OpenScenario {
    fn new(name: &str, tags: Vec<String>, start_line: usize) -> Self {
        Self {
            scenario: GherkinScenario {
                name: name.to_string(),
                tags,
                given: Vec::new(),
                when: Vec::new(),
                then: Vec::new(),
                spans: Vec::new(),
            },
            start_line,
        }
    }

    fn push_step(&mut self, kind: StepKind, text: &str) {
        let steps = match kind {
            StepKind::Given => &mut self.scenario.given,
            StepKind::When => &mut self.scenario.when,
            StepKind::Then => &mut self.scenario.then,
        };
        steps.push(text.to_string());
    }

    fn finish(mut self, end_line: usize) -> GherkinScenario {
        self.scenario.spans = vec![SourceSpan::range(self.start_line, end_line)];
        self.scenario
    }
}

/// Scanner position in the Gherkin structure
enum ScanState {
    Outside,
    InFeature(OpenFeature),
    InScenario(OpenFeature, OpenScenario),
}

struct GherkinScanner {
    state: ScanState,
    pending_tags: Vec<String>,
    last_step: Option<StepKind>,
    features: Vec<GherkinFeature>,
    findings: Vec<String>,
}

impl GherkinScanner {
    fn new() -> Self {
        Self {
            state: ScanState::Outside,
            pending_tags: Vec::new(),
            last_step: None,
            features: Vec::new(),
            findings: Vec::new(),
        }
    }

    fn take_state(&mut self) -> ScanState {
        std::mem::replace(&mut self.state, ScanState::Outside)
    }

    fn close_scenario(&mut self, end_line: usize) {
        self.state = match self.take_state() {
            ScanState::InScenario(mut feature, scenario) => {
                feature.feature.scenarios.push(scenario.finish(end_line));
                ScanState::InFeature(feature)
            }
            other => other,
        };
        self.last_step = None;
    }

    fn close_feature(&mut self, end_line: usize) {
        self.close_scenario(end_line);
        self.state = match self.take_state() {
            ScanState::InFeature(feature) => {
                self.features.push(feature.finish(end_line));
                ScanState::Outside
            }
            other => other,
        };
    }

    fn open_feature(&mut self, name: &str, line_no: usize) {
        self.close_feature(line_no - 1);
        self.state = ScanState::InFeature(OpenFeature::new(name, line_no));
    }

    fn open_scenario(&mut self, name: &str, line_no: usize) {
        if matches!(self.state, ScanState::Outside) {
            self.state = ScanState::InFeature(OpenFeature::new(IMPLICIT_FEATURE_NAME, line_no));
        }
        self.close_scenario(line_no - 1);

        let tags = std::mem::take(&mut self.pending_tags);
        self.state = match self.take_state() {
            ScanState::InFeature(feature) => {
                ScanState::InScenario(feature, OpenScenario::new(name, tags, line_no))
            }
            other => other,
        };
        self.last_step = None;
    }

    fn process_line(&mut self, line_no: usize, line: &str) {
        if is_blank(line) {
            return;
        }
        let trimmed = line.trim();

        if trimmed.starts_with('@') {
            self.pending_tags = trimmed
                .split_whitespace()
                .filter(|token| token.starts_with('@'))
                .map(str::to_string)
                .collect();
            return;
        }

        if let Some(caps) = FEATURE_REGEX.captures(trimmed) {
            let name = caps.get(1).map_or("", |m| m.as_str()).trim();
            self.open_feature(name, line_no);
            return;
        }

        if let Some(caps) = SCENARIO_REGEX.captures(trimmed) {
            let name = caps.get(2).map_or("", |m| m.as_str()).trim();
            self.open_scenario(name, line_no);
            return;
        }

        match &mut self.state {
            ScanState::InFeature(feature) if !BACKGROUND_REGEX.is_match(trimmed) => {
                feature.append_description(trimmed);
            }
            ScanState::InScenario(_, scenario) => {
                let step = STEP_REGEX.find(trimmed).and_then(|m| {
                    StepKeyword::parse(m.as_str().trim()).map(|keyword| (keyword, &trimmed[m.end()..]))
                });

                match (step, self.last_step) {
                    (Some((StepKeyword::Primary(kind), text)), _) => {
                        scenario.push_step(kind, text);
                        self.last_step = Some(kind);
                    }
                    (Some((StepKeyword::Continuation, text)), Some(kind)) => {
                        scenario.push_step(kind, text);
                    }
                    _ => self.findings.push(format!(
                        "Line {}: Unrecognized scenario line: {}",
                        line_no, trimmed
                    )),
                }
            }
            _ => self
                .findings
                .push(format!("Line {}: Unrecognized line: {}", line_no, trimmed)),
        }
    }

    fn finish(mut self, last_line: usize) -> (Vec<GherkinFeature>, Vec<String>) {
        self.close_feature(last_line);
        if self.features.is_empty() {
            self.findings
                .push("No Gherkin Feature/Scenario blocks found.".to_string());
        }
        (self.features, self.findings)
    }
}

/// Extract Gherkin features and scenarios from transcript or notes text
pub fn extract_gherkin(text: &str, tenant_id: Option<&str>) -> GherkinExtraction {
    let lines = to_lines(text);
    let mut scanner = GherkinScanner::new();

    for (idx, line) in lines.iter().enumerate() {
        scanner.process_line(idx + 1, line);
    }

    let (features, non_gherkin_findings) = scanner.finish(lines.len());

    debug!(
        "Extracted {} Gherkin features ({} scenarios), {} findings",
        features.len(),
        features.iter().map(|f| f.scenarios.len()).sum::<usize>(),
        non_gherkin_findings.len()
    );

    GherkinExtraction {
        tenant_id: tenant_id.map(str::to_string),
        features,
        non_gherkin_findings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHECKOUT: &str = "\
Feature: Checkout
  Customers pay for their cart.

  @smoke @payments
  Scenario: Pay with card
    Given a cart with 2 items
    And a saved card
    When the customer pays
    Then the order is confirmed
    But no email is sent twice

  Scenario Outline: Pay with voucher
    Given a voucher
    When the customer redeems it
    Then the total is reduced";

    #[test]
    fn test_canonical_feature() {
        let result = extract_gherkin(CHECKOUT, None);

        assert!(result.non_gherkin_findings.is_empty());
        assert_eq!(result.features.len(), 1);

        let feature = &result.features[0];
        assert_eq!(feature.name, "Checkout");
        assert_eq!(feature.description.as_deref(), Some("Customers pay for their cart."));
        assert_eq!(feature.spans, vec![SourceSpan::range(1, 15)]);
        assert_eq!(feature.scenarios.len(), 2);

        let card = &feature.scenarios[0];
        assert_eq!(card.name, "Pay with card");
        assert_eq!(card.tags, vec!["@smoke", "@payments"]);
        assert_eq!(card.given, vec!["a cart with 2 items", "a saved card"]);
        assert_eq!(card.when, vec!["the customer pays"]);
        assert_eq!(card.then, vec!["the order is confirmed", "no email is sent twice"]);
        assert_eq!(card.spans, vec![SourceSpan::range(5, 11)]);

        let voucher = &feature.scenarios[1];
        assert_eq!(voucher.name, "Pay with voucher");
        assert!(voucher.tags.is_empty());
        assert_eq!(voucher.spans, vec![SourceSpan::range(12, 15)]);
    }

    #[test]
    fn test_implicit_feature() {
        let text = "Scenario: Login\nGiven a user\nWhen they log in\nThen they see the dashboard";
        let result = extract_gherkin(text, Some("t1"));

        assert_eq!(result.tenant_id.as_deref(), Some("t1"));
        assert_eq!(result.features.len(), 1);
        assert_eq!(result.features[0].name, IMPLICIT_FEATURE_NAME);
        assert_eq!(result.features[0].spans, vec![SourceSpan::range(1, 4)]);
        assert_eq!(result.features[0].scenarios[0].then, vec!["they see the dashboard"]);
    }

    #[test]
    fn test_and_without_previous_step_is_a_finding() {
        let text = "Feature: F\nScenario: S\nAnd something odd\nGiven a start";
        let result = extract_gherkin(text, None);

        assert_eq!(
            result.non_gherkin_findings,
            vec!["Line 3: Unrecognized scenario line: And something odd"]
        );
        assert_eq!(result.features[0].scenarios[0].given, vec!["a start"]);
    }

    #[test]
    fn test_lines_outside_features_are_findings() {
        let text = "Intro chatter\nFeature: F\nBackground:\nScenario: S\nGiven x\nrandom remark";
        let result = extract_gherkin(text, None);

        assert_eq!(
            result.non_gherkin_findings,
            vec![
                "Line 1: Unrecognized line: Intro chatter",
                "Line 3: Unrecognized line: Background:",
                "Line 6: Unrecognized scenario line: random remark",
            ]
        );
        assert!(result.features[0].description.is_none());
    }

    #[test]
    fn test_tags_are_taken_by_next_scenario() {
        let text = "@b @c not-a-tag\nFeature: F\nScenario: S\nGiven x\nScenario: T\nGiven y";
        let result = extract_gherkin(text, None);

        let scenarios = &result.features[0].scenarios;
        assert_eq!(scenarios[0].tags, vec!["@b", "@c"]);
        assert!(scenarios[1].tags.is_empty());
    }

    #[test]
    fn test_later_tag_line_replaces_earlier() {
        let result = extract_gherkin("Feature: F\n@a\n@b\nScenario: S\nGiven x", None);

        assert_eq!(result.features[0].scenarios[0].tags, vec!["@b"]);
    }

    #[test]
    fn test_new_feature_closes_previous() {
        let text = "Feature: One\nScenario: A\nGiven a\n\nFeature: Two\nScenario: B\nThen b";
        let result = extract_gherkin(text, None);

        assert_eq!(result.features.len(), 2);
        assert_eq!(result.features[0].spans, vec![SourceSpan::range(1, 4)]);
        assert_eq!(result.features[0].scenarios[0].spans, vec![SourceSpan::range(2, 4)]);
        assert_eq!(result.features[1].spans, vec![SourceSpan::range(5, 7)]);
    }

    #[test]
    fn test_no_gherkin() {
        let result = extract_gherkin("", None);

        assert!(result.features.is_empty());
        assert_eq!(
            result.non_gherkin_findings,
            vec!["No Gherkin Feature/Scenario blocks found."]
        );
    }
}
