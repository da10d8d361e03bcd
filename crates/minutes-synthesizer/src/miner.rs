//! Requirement mining
//!
//! Pulls need/obligation/capability sentences out of plain meeting talk.
//! Lines are kept only when they use requirement vocabulary ("need to",
//! "must", "should", "would like to", ...), then split into rough
//! sentences so one long line can yield several requirements.

use crate::types::{MinedRequirement, RequirementMining};
use minutes_domain::{collapse_whitespace, to_lines, Evidence};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static REQUIREMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(need to|needs to|need|needs|must|should|have to|has to|can|cannot|can't|we want to|we need to|we need|users want to|user wants to|would like to|i'd like to|we'd like to|we would like to)\b",
    )
    .expect("Invalid requirement vocabulary pattern")
});

static SENTENCE_BREAK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("Invalid sentence break pattern"));

// "Jordan: ..." or "Jordan (Product Owner): ..."
static SPEAKER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][A-Za-z0-9 ._'\-()]{0,60}:\s+").expect("Invalid speaker prefix pattern")
});

static FILLER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(so,|so|okay,|ok,|alright,|right,|well,)\s+").expect("Invalid filler pattern")
});

static MEETING_META_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?:thanks|thank you)\s+for\s+joining\b|(?:today'?s\s+)?goal\s+is\b|(?:the\s+)?purpose\s+is\b|(?:the\s+)?agenda\s+is\b|let'?s\s+(?:talk\s+about|discuss|review)\b)",
    )
    .expect("Invalid meeting meta pattern")
});

/// Whether text uses requirement vocabulary
pub fn is_requirement_like(text: &str) -> bool {
    REQUIREMENT_REGEX.is_match(text)
}

/// Split a line into rough sentences after `.`, `!` or `?` plus whitespace
///
/// Sentences are whitespace-collapsed; empty ones are dropped.
fn split_sentences(line: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in SENTENCE_BREAK_REGEX.find_iter(line) {
        // Punctuation is ASCII, so start + 1 is a char boundary
        sentences.push(collapse_whitespace(&line[start..m.start() + 1]));
        start = m.end();
    }
    sentences.push(collapse_whitespace(&line[start..]));

    sentences.retain(|s| !s.is_empty());
    sentences
}

/// Remove speaker prefix and leading filler words
fn clean_requirement_text(sentence: &str) -> String {
    let without_speaker = SPEAKER_REGEX.replace(sentence, "");
    let without_filler = FILLER_REGEX.replace(&without_speaker, "");
    collapse_whitespace(&without_filler)
}

fn is_meeting_meta(sentence: &str) -> bool {
    MEETING_META_REGEX.is_match(&sentence.trim().to_lowercase())
}

/// Mine requirement statements from plain meeting text
pub fn mine_requirements(text: &str, tenant_id: Option<&str>) -> RequirementMining {
    let lines = to_lines(text);
    let mut requirements = Vec::new();

    for (idx, raw) in lines.iter().enumerate() {
        let line = raw.trim();
        if line.is_empty() || !is_requirement_like(line) {
            continue;
        }

        for sentence in split_sentences(line) {
            // Questions are discovery prompts, not requirements
            if sentence.ends_with('?') {
                continue;
            }
            if !is_requirement_like(&sentence) {
                continue;
            }

            let cleaned = clean_requirement_text(&sentence);
            if cleaned.is_empty() || is_meeting_meta(&cleaned) {
                continue;
            }

            requirements.push(MinedRequirement::new(
                cleaned,
                Evidence::from_line(sentence, idx + 1),
            ));
        }
    }

    let mut gaps = Vec::new();
    let mut follow_up_questions = Vec::new();

    if requirements.is_empty() {
        gaps.push(
            "No obvious requirement statements detected (e.g., \u{201c}need to\u{201d}, \u{201c}must\u{201d}, \u{201c}should\u{201d})."
                .to_string(),
        );
        follow_up_questions.push("Who is the target user/persona for this meeting?".to_string());
        follow_up_questions.push("What are the top 3 required capabilities discussed?".to_string());
        follow_up_questions.push(
            "Are there any explicit constraints (security, performance, compliance)?".to_string(),
        );
    }

    debug!(
        "Mined {} requirements from {} lines",
        requirements.len(),
        lines.len()
    );

    RequirementMining {
        tenant_id: tenant_id.map(str::to_string),
        requirements,
        gaps,
        follow_up_questions,
    }
}
