//! Records produced by the extractors

use minutes_domain::{Confidence, SourceSpan};
use serde::{Deserialize, Serialize};

/// An explicit "As a ... I want ..." statement found in the text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedUserStory {
    /// Who wants it ("As a ...")
    pub persona: String,

    /// What they want ("I want ...")
    pub capability: String,

    /// Why ("so that ..."), when stated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benefit: Option<String>,

    /// Criteria collected from the lines following the story
    pub acceptance_criteria: Vec<String>,

    /// Story line through the last consumed criteria line
    pub spans: Vec<SourceSpan>,
}

/// Result of user story extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStoryExtraction {
    /// Caller's tenant, passed through
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,

    /// Stories in order of appearance
    pub user_stories: Vec<ExtractedUserStory>,

    /// Missing pieces worth flagging
    pub gaps: Vec<String>,

    /// Questions to close the gaps
    pub follow_up_questions: Vec<String>,
}

/// A scenario read from Gherkin text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GherkinScenario {
    /// Scenario title
    pub name: String,

    /// `@tags` preceding the scenario
    pub tags: Vec<String>,

    /// Given steps (keyword stripped)
    pub given: Vec<String>,

    /// When steps (keyword stripped)
    pub when: Vec<String>,

    /// Then steps (keyword stripped)
    pub then: Vec<String>,

    /// Opening line through closing line
    pub spans: Vec<SourceSpan>,
}

/// A feature read from Gherkin text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GherkinFeature {
    /// Feature title
    pub name: String,

    /// Free text between the feature header and its first scenario
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Scenarios in order of appearance
    pub scenarios: Vec<GherkinScenario>,

    /// Opening line through closing line
    pub spans: Vec<SourceSpan>,
}

/// Result of Gherkin extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GherkinExtraction {
    /// Caller's tenant, passed through
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,

    /// Features in order of appearance
    pub features: Vec<GherkinFeature>,

    /// Lines that could not be placed in the Gherkin structure
    pub non_gherkin_findings: Vec<String>,
}

/// Kind of meeting signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalType {
    /// Something the meeting settled
    Decision,
    /// Work somebody has to do
    ActionItem,
    /// Something that could go wrong
    Risk,
    /// Something the work waits on
    Dependency,
    /// Something nobody could answer yet
    OpenQuestion,
}

impl SignalType {
    /// Get the signal type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalType::Decision => "Decision",
            SignalType::ActionItem => "ActionItem",
            SignalType::Risk => "Risk",
            SignalType::Dependency => "Dependency",
            SignalType::OpenQuestion => "OpenQuestion",
        }
    }
}

impl std::fmt::Display for SignalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified meeting line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingSignal {
    /// Classification
    #[serde(rename = "type")]
    pub signal_type: SignalType,

    /// Confidence of the rule that matched
    pub confidence: Confidence,

    /// Trimmed line text
    pub text: String,

    /// The line it came from
    pub span: SourceSpan,
}

/// Result of meeting signal extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingSignals {
    /// Caller's tenant, passed through
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,

    /// At most one signal per line, in line order
    pub signals: Vec<MeetingSignal>,

    /// Next steps based on which signal types were seen
    pub suggested_actions: Vec<String>,
}
