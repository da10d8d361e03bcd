//! Public API tests for minutes-synthesizer

use minutes_domain::{to_lines, Evidence, SourceSpan};
use minutes_synthesizer::{
    mine_requirements, synthesize_gherkin, synthesize_user_stories, MinedRequirement,
    Synthesizer, SynthesizerConfig, DEFAULT_FEATURE_NAME,
};
use proptest::prelude::*;
use serde_json::json;

const SUPPORT_MEETING: &str = "\
Thanks for joining, we need to keep this quick.
Jordan (Product Owner): So, agents need to add internal notes that customers cannot see.
Priya: Search results must be returned within 2 seconds.
Sam: Searches should lock for 15 minutes after 5 failed login attempts.
Should everyone see the same information?
Priya: If someone enters an invalid ticket ID we should show an error.";

#[test]
fn test_lockout_requirement_yields_one_scenario() {
    let requirement = MinedRequirement::new(
        "Searches lock for 15 minutes after 5 failed login attempts.",
        Evidence::from_line("Searches lock for 15 minutes after 5 failed login attempts.", 1),
    );

    let result = synthesize_gherkin(&[requirement], None, None, DEFAULT_FEATURE_NAME);

    let scenarios = &result.features[0].scenarios;
    assert_eq!(scenarios.len(), 1);
    assert_eq!(scenarios[0].name, "Too many invalid login attempts triggers lockout");
    assert!(scenarios[0]
        .then
        .contains(&"further searches are blocked for 15 minutes".to_string()));
}

#[test]
fn test_support_meeting_mining() {
    let mined = mine_requirements(SUPPORT_MEETING, Some("acme"));
    let texts: Vec<_> = mined.requirements.iter().map(|r| r.text.as_str()).collect();

    assert_eq!(
        texts,
        vec![
            "agents need to add internal notes that customers cannot see.",
            "Search results must be returned within 2 seconds.",
            "Searches should lock for 15 minutes after 5 failed login attempts.",
            "If someone enters an invalid ticket ID we should show an error.",
        ]
    );
    assert_eq!(mined.requirements[3].evidence[0].spans, vec![SourceSpan::single(6)]);
    assert!(mined.gaps.is_empty());
}

#[test]
fn test_support_meeting_gherkin() {
    let result = Synthesizer::default().synthesize_gherkin(SUPPORT_MEETING, Some("acme"), None);
    let names: Vec<_> = result.features[0]
        .scenarios
        .iter()
        .map(|s| s.name.as_str())
        .collect();

    assert_eq!(
        names,
        vec![
            "Support agent adds an internal note",
            "Internal note is hidden from customers",
            "Search returns results within 2 seconds",
            "Too many invalid login attempts triggers lockout",
            "Valid ticket is accepted",
            "Invalid ticket shows an error",
        ]
    );
    assert_eq!(result.follow_up_questions.len(), 3);
}

#[test]
fn test_support_meeting_stories() {
    let result = Synthesizer::default().synthesize_user_stories(SUPPORT_MEETING, None, Some(2));

    assert_eq!(result.stories.len(), 2);
    assert_eq!(result.stories[0].persona, "support agent");
    assert_eq!(result.stories[0].capability, "to add internal notes");
    assert_eq!(result.stories[1].capability, "to receive search results within 2 seconds");
}

#[test]
fn test_synthesis_envelope_json_shape() {
    let requirement = MinedRequirement::new(
        "Users can export.",
        Evidence::from_line("Sam: Users can export.", 4),
    );
    let stories = synthesize_user_stories(&[requirement], None, None);
    let value = serde_json::to_value(&stories).unwrap();

    assert_eq!(value["modeUsed"], "deterministic");
    assert!(value.get("tenantId").is_none());
    let story = &value["stories"][0];
    assert_eq!(story["persona"], "user");
    assert_eq!(story["capability"], "to Users can export");
    assert!(story.get("benefit").is_none());
    assert_eq!(story["confidence"], "low");
    assert_eq!(
        story["evidence"],
        json!([{
            "quote": "Sam: Users can export.",
            "spans": [{ "kind": "line-range", "startLine": 4, "endLine": 4 }]
        }])
    );
}

#[test]
fn test_empty_text_reports_gaps() {
    let mined = mine_requirements("", None);
    assert!(mined.requirements.is_empty());
    assert_eq!(mined.gaps.len(), 1);
    assert_eq!(mined.follow_up_questions.len(), 3);

    let stories = Synthesizer::default().synthesize_user_stories("", None, None);
    assert!(stories.stories.is_empty());
    assert_eq!(stories.gaps, mined.gaps);
}

#[test]
fn test_config_from_toml_drives_facade() {
    let config = SynthesizerConfig::from_toml(
        r#"
max_items = 1
feature_name = "Support desk"
mode = "deterministic"
"#,
    )
    .unwrap();
    let result = Synthesizer::new(config)
        .unwrap()
        .synthesize_gherkin(SUPPORT_MEETING, None, None);

    assert_eq!(result.features[0].name, "Support desk");
    assert_eq!(result.features[0].scenarios.len(), 1);
}

fn meeting_line() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("Alex: We need to export reports.".to_string()),
        Just("Admins must reject an invalid email.".to_string()),
        Just("Lock for 5 minutes after 3 failed attempts.".to_string()),
        Just("Results must show within 1 second.".to_string()),
        Just("Should we ship? Customers cannot see notes.".to_string()),
        Just("Managers can view totals, but not edit them.".to_string()),
        "[A-Za-z ,.?!]{0,40}",
    ]
}

proptest! {
    #[test]
    fn prop_evidence_spans_stay_within_input(
        lines in prop::collection::vec(meeting_line(), 0..20),
    ) {
        let text = lines.join("\n");
        let line_count = to_lines(&text).len();

        for requirement in mine_requirements(&text, None).requirements {
            prop_assert_eq!(requirement.evidence.len(), 1);
            for span in &requirement.evidence[0].spans {
                prop_assert!(span.fits(line_count));
            }
        }
    }

    #[test]
    fn prop_synthesis_is_deterministic_and_capped(
        lines in prop::collection::vec(meeting_line(), 0..20),
        max_items in 1usize..=50,
    ) {
        let text = lines.join("\n");
        let synthesizer = Synthesizer::default();

        let first = synthesizer.synthesize_gherkin(&text, None, Some(max_items));
        let second = synthesizer.synthesize_gherkin(&text, None, Some(max_items));
        prop_assert!(first.features[0].scenarios.len() <= max_items);
        prop_assert_eq!(first, second);

        let stories = synthesizer.synthesize_user_stories(&text, None, Some(max_items));
        prop_assert!(stories.stories.len() <= max_items);
        for story in &stories.stories {
            prop_assert!(!story.acceptance_criteria.is_empty());
        }
    }
}
