//! User story synthesis
//!
//! Turns mined requirement sentences into "As a ..., I want ..." stories
//! with a happy-path criterion and one edge-case criterion each.

use crate::config::clamp_max_items;
use crate::intent::{
    extract_benefit, extract_invalid_thing, extract_lockout, extract_only_constraint,
    extract_performance, infer_persona, is_display_capability, mentions_results,
    normalize_capability, shown_object, split_but_not_constraint, split_inline_constraint,
    strip_trailing_periods, to_sentence, LockoutConstraint, PerformanceConstraint,
};
use crate::types::{MinedRequirement, ModeUsed, SynthesizedUserStory, UserStorySynthesis};
use minutes_domain::Confidence;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static CONDITIONAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*if\b").expect("Invalid conditional pattern"));

static SHOW_WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(show|display)\b").expect("Invalid show word pattern"));

static ERROR_WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\berror\b").expect("Invalid error word pattern"));

static GOAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(need to|needs to|must|should|have to|has to|we want to|we need to)\b\s+(.+?)(?:\bso that\b|$)",
    )
    .expect("Invalid goal pattern")
});

static PROHIBITION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(cannot|can't|must not|invalid|error|denied|reject|fails?)\b")
        .expect("Invalid prohibition pattern")
});

/// "I want" phrase plus optional benefit
struct Goal {
    i_want: String,
    benefit: Option<String>,
}

impl Goal {
    fn without_benefit(i_want: String) -> Self {
        Self {
            i_want,
            benefit: None,
        }
    }
}

/// Pick the goal, most specific phrasing first
fn infer_goal(text: &str) -> Goal {
    if CONDITIONAL_REGEX.is_match(text) && SHOW_WORD_REGEX.is_match(text) && ERROR_WORD_REGEX.is_match(text) {
        let thing = extract_invalid_thing(text).unwrap_or_else(|| "input".to_string());
        return Goal::without_benefit(format!(
            "to see an error message when I provide an invalid {}",
            thing
        ));
    }

    if let Some(lockout) = extract_lockout(text) {
        return Goal::without_benefit(format!(
            "to prevent repeated invalid {} attempts by temporarily locking searches",
            lockout.thing_or_input()
        ));
    }

    if let Some(perf) = extract_performance(text).filter(|_| mentions_results(text)) {
        return Goal::without_benefit(format!(
            "to receive search results within {} seconds",
            perf.within_seconds
        ));
    }

    let goal = GOAL_REGEX
        .captures(text)
        .and_then(|caps| caps.get(2))
        .map_or(text, |m| m.as_str());
    let goal = strip_trailing_periods(goal);

    let i_want = if goal.to_lowercase().starts_with("to ") {
        goal.to_string()
    } else {
        format!("to {}", goal)
    };

    Goal {
        i_want,
        benefit: extract_benefit(text),
    }
}

/// Inputs to the edge-case criterion, in priority order
struct EdgeFacts<'a> {
    persona: &'a str,
    lockout: Option<LockoutConstraint>,
    performance: Option<PerformanceConstraint>,
    only: Option<String>,
    constraint: Option<String>,
    invalid_thing: Option<&'a str>,
    prohibitive: bool,
}

fn edge_criterion(facts: EdgeFacts<'_>) -> String {
    if let Some(lockout) = facts.lockout {
        format!(
            "After {} invalid {} attempts, further searches are blocked for {} minutes",
            lockout.attempts,
            lockout.thing_or_input(),
            lockout.duration_minutes
        )
    } else if let Some(perf) = facts.performance {
        format!("Search results are returned within {} seconds", perf.within_seconds)
    } else if let Some(only) = facts.only {
        format!("The {} can only {}", facts.persona, only)
    } else if let Some(constraint) = facts.constraint {
        format!("The {} {}", facts.persona, constraint)
    } else if let Some(thing) = facts.invalid_thing {
        format!("If an invalid {} is provided, the system shows an error message", thing)
    } else if facts.prohibitive {
        "Invalid input or prohibited actions result in a clear error message".to_string()
    } else {
        "If the action cannot be completed, the system provides a clear error message".to_string()
    }
}

/// Key for duplicate detection: case and trailing punctuation ignored
fn criterion_key(criterion: &str) -> String {
    criterion
        .trim()
        .trim_end_matches(|c: char| c.is_ascii_punctuation())
        .to_lowercase()
}

fn push_unique(criteria: &mut Vec<String>, sentence: String) {
    if sentence.is_empty() {
        return;
    }
    let key = criterion_key(&sentence);
    if !criteria.iter().any(|existing| criterion_key(existing) == key) {
        criteria.push(sentence);
    }
}

fn synthesize_story(requirement: &MinedRequirement) -> SynthesizedUserStory {
    let text = requirement.text.as_str();
    let persona = infer_persona(text);
    let goal = infer_goal(text);

    let after_but_not = split_but_not_constraint(&normalize_capability(&goal.i_want));
    let after_inline = split_inline_constraint(&after_but_not.capability);
    let capability = after_inline.capability;
    let constraint = after_inline.constraint.or(after_but_not.constraint);
    let invalid_thing = extract_invalid_thing(text);

    let happy_path = if let Some(thing) = &invalid_thing {
        format!("If a valid {} is provided, the system accepts it", thing)
    } else if is_display_capability(&capability) {
        format!("The system shows {}", shown_object(&capability))
    } else {
        format!("The {} can {}", persona, capability)
    };

    let edge = edge_criterion(EdgeFacts {
        persona,
        lockout: extract_lockout(text),
        performance: extract_performance(text).filter(|_| mentions_results(text)),
        only: extract_only_constraint(text),
        constraint,
        invalid_thing: invalid_thing.as_deref(),
        prohibitive: PROHIBITION_REGEX.is_match(text),
    });

    let mut acceptance_criteria = Vec::with_capacity(2);
    push_unique(&mut acceptance_criteria, to_sentence(&happy_path));
    push_unique(&mut acceptance_criteria, to_sentence(&edge));

    SynthesizedUserStory {
        persona: persona.to_string(),
        capability: format!("to {}", capability),
        benefit: goal.benefit,
        acceptance_criteria,
        evidence: requirement.evidence.clone(),
        confidence: Confidence::Low,
    }
}

/// Synthesize user stories from mined requirements
///
/// One story per requirement in order, capped by `max_items` after
/// [`clamp_max_items`] (default 10, range 1 to 50).
pub fn synthesize_user_stories(
    requirements: &[MinedRequirement],
    tenant_id: Option<&str>,
    max_items: Option<usize>,
) -> UserStorySynthesis {
    let stories: Vec<_> = requirements
        .iter()
        .take(clamp_max_items(max_items))
        .map(synthesize_story)
        .collect();

    let mut follow_up_questions = Vec::new();
    if !stories.is_empty() {
        follow_up_questions.push("Which user roles/personas should we prioritize?".to_string());
        follow_up_questions.push(
            "What are the acceptance criteria for each story (success + error cases)?".to_string(),
        );
        follow_up_questions.push(
            "Are there non-functional requirements (latency, audit, security) that apply?"
                .to_string(),
        );
    }

    debug!(
        "Synthesized {} user stories from {} requirements",
        stories.len(),
        requirements.len()
    );

    UserStorySynthesis {
        tenant_id: tenant_id.map(str::to_string),
        mode_used: ModeUsed::Deterministic,
        stories,
        gaps: Vec::new(),
        follow_up_questions,
    }
}
