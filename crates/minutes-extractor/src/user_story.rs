//! Explicit user story extraction
//!
//! Finds "As a <persona>, I want <capability> so that <benefit>" lines and
//! attaches the acceptance criteria written right below them.

use crate::types::{ExtractedUserStory, UserStoryExtraction};
use minutes_domain::{to_lines, SourceSpan};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Lines after a story that may still hold its acceptance criteria
const CRITERIA_LOOKAHEAD: usize = 8;

static STORY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*as\s+an?\s+(.+?)\s*(?:,\s*|\s+)i\s+want\s+(.+?)(?:\s+so\s+that\s+(.+?))?\s*$",
    )
    .expect("Invalid user story regex pattern")
});

static CRITERIA_HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(ac|acceptance criteria)\s*:\s*").expect("Invalid criteria header pattern")
});

static BULLET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*]\s+").expect("Invalid bullet pattern"));

/// Criteria collected below a story
struct CriteriaBlock {
    criteria: Vec<String>,
    /// Index of the last line that belongs to the block
    last_consumed: Option<usize>,
}

/// Collect acceptance criteria starting at line index `start`
///
/// Before the first criterion, unrelated lines and blank lines are skipped.
/// Once one is collected, a blank line ends the block (and belongs to it)
/// while any other non-bullet line ends it without being consumed.
fn take_acceptance_criteria(lines: &[String], start: usize) -> CriteriaBlock {
    let mut block = CriteriaBlock {
        criteria: Vec::new(),
        last_consumed: None,
    };
    let end = lines.len().min(start + CRITERIA_LOOKAHEAD);

    for (idx, line) in lines.iter().enumerate().take(end).skip(start) {
        let trimmed = line.trim();

        if let Some(header) = CRITERIA_HEADER_REGEX.find(trimmed) {
            let remainder = trimmed[header.end()..].trim();
            if !remainder.is_empty() {
                block.criteria.push(remainder.to_string());
                block.last_consumed = Some(idx);
            }
            continue;
        }

        if let Some(bullet) = BULLET_REGEX.find(trimmed) {
            block.criteria.push(trimmed[bullet.end()..].to_string());
            block.last_consumed = Some(idx);
            continue;
        }

        if block.criteria.is_empty() {
            continue;
        }

        if trimmed.is_empty() {
            block.last_consumed = Some(idx);
        }
        break;
    }

    block
}

/// Extract explicit user stories from transcript or notes text
pub fn extract_user_stories(text: &str, tenant_id: Option<&str>) -> UserStoryExtraction {
    let lines = to_lines(text);
    let mut user_stories = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let Some(caps) = STORY_REGEX.captures(line) else {
            continue;
        };

        let persona = caps.get(1).map_or("", |m| m.as_str()).trim().to_string();
        let capability = caps.get(2).map_or("", |m| m.as_str()).trim().to_string();
        let benefit = caps
            .get(3)
            .map(|m| m.as_str().trim().to_string())
            .filter(|b| !b.is_empty());

        let block = take_acceptance_criteria(&lines, idx + 1);
        let end = block.last_consumed.unwrap_or(idx);

        user_stories.push(ExtractedUserStory {
            persona,
            capability,
            benefit,
            acceptance_criteria: block.criteria,
            spans: vec![SourceSpan::range(idx + 1, end + 1)],
        });
    }

    let mut gaps = Vec::new();
    let mut follow_up_questions = Vec::new();

    if user_stories.is_empty() {
        gaps.push(r#"No explicit "As a ... I want ..." user story statements found."#.to_string());
        follow_up_questions.push(
            "Did the meeting include requirements phrased as user stories, or should I infer them from discussion?"
                .to_string(),
        );
        follow_up_questions.push("Who is the primary user/persona for these requirements?".to_string());
    }

    for story in &user_stories {
        let statement = format!("As a {} I want {}", story.persona, story.capability);
        if story.benefit.is_none() {
            gaps.push(format!(r#"User story missing "so that": {}"#, statement));
            follow_up_questions.push(format!(
                r#"What is the underlying benefit/value ("so that") for: {}?"#,
                statement
            ));
        }
        if story.acceptance_criteria.is_empty() {
            gaps.push(format!("No acceptance criteria captured for: {}", statement));
            follow_up_questions.push(format!(
                r#"What would make this story "done" (acceptance criteria) for: {}?"#,
                statement
            ));
        }
    }

    debug!(
        "Extracted {} user stories from {} lines ({} gaps)",
        user_stories.len(),
        lines.len(),
        gaps.len()
    );

    UserStoryExtraction {
        tenant_id: tenant_id.map(str::to_string),
        user_stories,
        gaps,
        follow_up_questions,
    }
}
