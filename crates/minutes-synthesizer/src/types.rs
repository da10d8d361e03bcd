//! Records produced by mining and synthesis

use minutes_domain::{Confidence, Evidence};
use serde::{Deserialize, Serialize};

/// A requirement sentence mined from plain meeting text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinedRequirement {
    /// Cleaned sentence (speaker and filler removed)
    pub text: String,

    /// Exactly one entry: the original sentence and its line
    pub evidence: Vec<Evidence>,
}

impl MinedRequirement {
    /// Create a requirement backed by one evidence entry
    pub fn new(text: impl Into<String>, evidence: Evidence) -> Self {
        Self {
            text: text.into(),
            evidence: vec![evidence],
        }
    }
}

/// Result of requirement mining
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementMining {
    /// Caller's tenant, passed through
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,

    /// Requirements in order of appearance
    pub requirements: Vec<MinedRequirement>,

    /// Missing pieces worth flagging
    pub gaps: Vec<String>,

    /// Questions to close the gaps
    pub follow_up_questions: Vec<String>,
}

/// Which path produced a synthesis envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeUsed {
    /// Heuristic templates
    Deterministic,
    /// An external LLM backend
    Llm,
}

/// A user story inferred from a requirement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizedUserStory {
    /// Who wants it
    pub persona: String,

    /// What they want, phrased "to ..."
    pub capability: String,

    /// Why, when a "so that" clause was present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benefit: Option<String>,

    /// Happy path first, then one edge case
    pub acceptance_criteria: Vec<String>,

    /// Evidence of the source requirement
    pub evidence: Vec<Evidence>,

    /// Always low for heuristic output
    pub confidence: Confidence,
}

/// Result of user story synthesis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStorySynthesis {
    /// Caller's tenant, passed through
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,

    /// Path that produced the stories
    pub mode_used: ModeUsed,

    /// Stories, one per requirement
    pub stories: Vec<SynthesizedUserStory>,

    /// Missing pieces worth flagging
    pub gaps: Vec<String>,

    /// Questions to close the gaps
    pub follow_up_questions: Vec<String>,
}

/// A scenario inferred from a requirement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizedGherkinScenario {
    /// Scenario title
    pub name: String,

    /// Given steps
    pub given: Vec<String>,

    /// When steps
    pub when: Vec<String>,

    /// Then steps
    pub then: Vec<String>,

    /// Evidence of the source requirement
    pub evidence: Vec<Evidence>,

    /// Always low for heuristic output
    pub confidence: Confidence,
}

/// A feature grouping synthesized scenarios
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizedGherkinFeature {
    /// Feature title
    pub name: String,

    /// Scenarios in requirement order
    pub scenarios: Vec<SynthesizedGherkinScenario>,
}

/// Result of Gherkin synthesis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GherkinSynthesis {
    /// Caller's tenant, passed through
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,

    /// Path that produced the features
    pub mode_used: ModeUsed,

    /// Synthesized features
    pub features: Vec<SynthesizedGherkinFeature>,

    /// Missing pieces worth flagging
    pub gaps: Vec<String>,

    /// Questions to close the gaps
    pub follow_up_questions: Vec<String>,
}
