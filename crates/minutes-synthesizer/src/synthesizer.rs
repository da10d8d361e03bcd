//! Main synthesizer implementation

use crate::config::{SynthesisMode, SynthesizerConfig};
use crate::error::SynthesizerError;
use crate::gherkin::synthesize_gherkin;
use crate::miner::mine_requirements;
use crate::types::{GherkinSynthesis, ModeUsed, RequirementMining, UserStorySynthesis};
use crate::user_story::synthesize_user_stories;
use tracing::{info, warn};

const LLM_UNAVAILABLE_GAP: &str = "LLM mode requested but LLM is not configured.";
const LLM_UNAVAILABLE_FOLLOW_UP: &str =
    "Configure an LLM synthesis backend, or use deterministic mode.";

/// Text-in, envelope-out synthesis
///
/// Mines requirements from the raw text, synthesizes stories or scenarios
/// from them, then appends the miner's gaps and follow-up questions so a
/// transcript with no requirements still explains itself.
///
/// No LLM backend lives in this crate: `Auto` runs the deterministic path
/// and `Llm` answers with an empty envelope that says so.
#[derive(Debug, Clone, Default)]
pub struct Synthesizer {
    config: SynthesizerConfig,
}

impl Synthesizer {
    /// Create a synthesizer with a validated config
    pub fn new(config: SynthesizerConfig) -> Result<Self, SynthesizerError> {
        config.validate().map_err(SynthesizerError::Config)?;
        Ok(Self { config })
    }

    /// Active configuration
    pub fn config(&self) -> &SynthesizerConfig {
        &self.config
    }

    /// Fail when the configured mode needs an LLM backend
    pub fn require_llm(&self) -> Result<(), SynthesizerError> {
        match self.config.mode {
            SynthesisMode::Llm => Err(SynthesizerError::LlmUnavailable(
                LLM_UNAVAILABLE_GAP.to_string(),
            )),
            SynthesisMode::Auto | SynthesisMode::Deterministic => Ok(()),
        }
    }

    /// Whether the deterministic path will run
    fn runs_deterministic(&self, operation: &str) -> bool {
        match self.config.mode {
            SynthesisMode::Llm => {
                warn!("{}: LLM mode requested but no LLM backend is configured", operation);
                false
            }
            SynthesisMode::Auto => {
                info!("{}: no LLM backend configured, using deterministic mode", operation);
                true
            }
            SynthesisMode::Deterministic => {
                info!("{}: using deterministic mode", operation);
                true
            }
        }
    }

    /// Mine requirement statements
    pub fn mine(&self, text: &str, tenant_id: Option<&str>) -> RequirementMining {
        mine_requirements(text, tenant_id)
    }

    /// Synthesize user stories from raw meeting text
    ///
    /// `max_items` overrides the configured limit for this call.
    pub fn synthesize_user_stories(
        &self,
        text: &str,
        tenant_id: Option<&str>,
        max_items: Option<usize>,
    ) -> UserStorySynthesis {
        if !self.runs_deterministic("user story synthesis") {
            return UserStorySynthesis {
                tenant_id: tenant_id.map(str::to_string),
                mode_used: ModeUsed::Deterministic,
                stories: Vec::new(),
                gaps: vec![LLM_UNAVAILABLE_GAP.to_string()],
                follow_up_questions: vec![LLM_UNAVAILABLE_FOLLOW_UP.to_string()],
            };
        }

        let limit = self.config.with_max_items(max_items).max_items;
        let mined = mine_requirements(text, tenant_id);
        let mut result = synthesize_user_stories(&mined.requirements, tenant_id, Some(limit));
        result.gaps.extend(mined.gaps);
        result.follow_up_questions.extend(mined.follow_up_questions);
        result
    }

    /// Synthesize Gherkin scenarios from raw meeting text
    ///
    /// `max_items` overrides the configured limit for this call.
    pub fn synthesize_gherkin(
        &self,
        text: &str,
        tenant_id: Option<&str>,
        max_items: Option<usize>,
    ) -> GherkinSynthesis {
        if !self.runs_deterministic("Gherkin synthesis") {
            return GherkinSynthesis {
                tenant_id: tenant_id.map(str::to_string),
                mode_used: ModeUsed::Deterministic,
                features: Vec::new(),
                gaps: vec![LLM_UNAVAILABLE_GAP.to_string()],
                follow_up_questions: vec![LLM_UNAVAILABLE_FOLLOW_UP.to_string()],
            };
        }

        let limit = self.config.with_max_items(max_items).max_items;
        let mined = mine_requirements(text, tenant_id);
        let mut result = synthesize_gherkin(
            &mined.requirements,
            tenant_id,
            Some(limit),
            &self.config.feature_name,
        );
        result.gaps.extend(mined.gaps);
        result.follow_up_questions.extend(mined.follow_up_questions);
        result
    }
}
