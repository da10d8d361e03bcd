//! Gherkin synthesis
//!
//! Each requirement runs through an ordered battery of templates; the
//! first template that recognizes the phrasing produces its scenarios.
//! Pair templates (valid/invalid, add/hide) emit two scenarios and stop
//! early when the item cap is reached.

use crate::config::clamp_max_items;
use crate::intent::{
    capability_from_requirement_basic, extract_invalid_thing, extract_lockout,
    extract_performance, extract_visibility_constraint, infer_persona_basic, is_audit_requirement,
    is_display_capability, is_only_assigned_visibility, is_view_but_not_edit, mentions_results,
    shown_object, strip_trailing_periods, LockoutConstraint, PerformanceConstraint,
    VisibilityConstraint,
};
use crate::types::{
    GherkinSynthesis, MinedRequirement, ModeUsed, SynthesizedGherkinFeature,
    SynthesizedGherkinScenario,
};
use minutes_domain::Confidence;
use tracing::debug;

/// Scenario under construction, before evidence is attached
struct Draft {
    name: String,
    given: Vec<String>,
    when: Vec<String>,
    then: Vec<String>,
}

impl Draft {
    fn new(name: impl Into<String>, given: String, when: String, then: String) -> Self {
        Self {
            name: name.into(),
            given: vec![given],
            when: vec![when],
            then: vec![then],
        }
    }

    fn into_scenario(self, requirement: &MinedRequirement) -> SynthesizedGherkinScenario {
        SynthesizedGherkinScenario {
            name: self.name,
            given: self.given,
            when: self.when,
            then: self.then,
            evidence: requirement.evidence.clone(),
            confidence: Confidence::Low,
        }
    }
}

fn only_assigned() -> Draft {
    let mut draft = Draft::new(
        "Contributors only see assigned tasks",
        "an individual contributor has an assigned task and an unassigned task exists".to_string(),
        "the contributor views their task list".to_string(),
        "assigned tasks are visible".to_string(),
    );
    draft.then.push("unassigned tasks are not visible".to_string());
    draft
}

fn view_but_not_edit() -> Draft {
    Draft::new(
        "Executives can view progress but cannot edit",
        "an executive is viewing project progress".to_string(),
        "the executive attempts to edit a project status".to_string(),
        "the system prevents editing".to_string(),
    )
}

fn lockout(persona: &str, lockout: &LockoutConstraint) -> Draft {
    let thing = lockout.thing_or_input();
    Draft::new(
        format!("Too many invalid {} attempts triggers lockout", thing),
        format!("a {} is using the product", persona),
        format!(
            "the {} attempts to search after {} invalid {} attempts",
            persona, lockout.attempts, thing
        ),
        format!(
            "further searches are blocked for {} minutes",
            lockout.duration_minutes
        ),
    )
}

fn performance(persona: &str, perf: PerformanceConstraint) -> Draft {
    Draft::new(
        format!("Search returns results within {} seconds", perf.within_seconds),
        format!("a {} is using the product", persona),
        "the user searches tickets".to_string(),
        format!(
            "search results are returned within {} seconds",
            perf.within_seconds
        ),
    )
}

fn audit() -> Draft {
    Draft::new(
        "Audit log entry is recorded for internal note changes",
        "a support agent is using the product".to_string(),
        "the support agent adds or edits an internal note".to_string(),
        "an audit log entry is recorded".to_string(),
    )
}

fn valid_invalid_pair(persona: &str, thing: &str) -> [Draft; 2] {
    [
        Draft::new(
            format!("Valid {} is accepted", thing),
            format!("a {} is using the product", persona),
            format!("the {} provides a valid {}", persona, thing),
            format!("the system accepts the {}", thing),
        ),
        Draft::new(
            format!("Invalid {} shows an error", thing),
            format!("a {} is using the product", persona),
            format!("the {} provides an invalid {}", persona, thing),
            "the system shows an error message".to_string(),
        ),
    ]
}

fn visibility_pair(visibility: &VisibilityConstraint) -> [Draft; 2] {
    [
        Draft::new(
            "Support agent adds an internal note",
            "a support agent is using the product".to_string(),
            "the support agent adds an internal note to a ticket".to_string(),
            "the internal note is saved".to_string(),
        ),
        Draft::new(
            "Internal note is hidden from customers",
            "an internal note exists on a ticket".to_string(),
            format!("the {} view the ticket", visibility.subject),
            format!(
                "{} is not visible to {}",
                visibility.object, visibility.subject
            ),
        ),
    ]
}

fn generic(text: &str, persona: &str) -> Draft {
    let capability = capability_from_requirement_basic(text);
    let name = strip_trailing_periods(text);
    let given = format!("a {} is using the product", persona);

    if is_display_capability(&capability) {
        let shown = shown_object(&capability);
        let when = if shown.to_lowercase().contains("search results") {
            "the user views ticket search results"
        } else {
            "the user views the relevant results"
        };
        return Draft::new(name, given, when.to_string(), format!("the system shows {}", shown));
    }

    let action = capability.strip_prefix("to ").unwrap_or(&capability);
    Draft::new(
        name,
        given,
        format!("the {} {}", persona, action),
        "the system allows the action and produces an observable result".to_string(),
    )
}

/// Run the template battery for one requirement
///
/// `room` is how many scenarios may still be added; it is at least 1.
fn drafts_for(text: &str, room: usize) -> Vec<Draft> {
    let persona = infer_persona_basic(text);

    if is_only_assigned_visibility(text) {
        return vec![only_assigned()];
    }
    if is_view_but_not_edit(text) {
        return vec![view_but_not_edit()];
    }
    if let Some(constraint) = extract_lockout(text) {
        return vec![lockout(persona, &constraint)];
    }
    if let Some(perf) = extract_performance(text).filter(|_| mentions_results(text)) {
        return vec![performance(persona, perf)];
    }
    if is_audit_requirement(text) {
        return vec![audit()];
    }
    if let Some(thing) = extract_invalid_thing(text) {
        return valid_invalid_pair(persona, &thing).into_iter().take(room).collect();
    }
    if let Some(visibility) = extract_visibility_constraint(text) {
        return visibility_pair(&visibility).into_iter().take(room).collect();
    }
    vec![generic(text, persona)]
}

/// Synthesize Gherkin scenarios from mined requirements
///
/// All scenarios are grouped under one feature called `feature_name`. The
/// scenario count is capped by `max_items` after [`clamp_max_items`]
/// (default 10, range 1 to 50).
pub fn synthesize_gherkin(
    requirements: &[MinedRequirement],
    tenant_id: Option<&str>,
    max_items: Option<usize>,
    feature_name: &str,
) -> GherkinSynthesis {
    let max_items = clamp_max_items(max_items);
    let mut scenarios = Vec::new();

    for requirement in requirements {
        if scenarios.len() >= max_items {
            break;
        }
        let room = max_items - scenarios.len();
        scenarios.extend(
            drafts_for(&requirement.text, room)
                .into_iter()
                .map(|draft| draft.into_scenario(requirement)),
        );
    }

    let mut follow_up_questions = Vec::new();
    if !scenarios.is_empty() {
        follow_up_questions
            .push("What are the preconditions/data setup for each scenario?".to_string());
        follow_up_questions.push("What are the success criteria and error cases?".to_string());
        follow_up_questions
            .push("Which scenarios are highest priority for automation?".to_string());
    }

    debug!(
        "Synthesized {} Gherkin scenarios from {} requirements",
        scenarios.len(),
        requirements.len()
    );

    GherkinSynthesis {
        tenant_id: tenant_id.map(str::to_string),
        mode_used: ModeUsed::Deterministic,
        features: vec![SynthesizedGherkinFeature {
            name: feature_name.to_string(),
            scenarios,
        }],
        gaps: Vec::new(),
        follow_up_questions,
    }
}
