//! Error types for the synthesizers

use thiserror::Error;

/// Errors that can occur while configuring or selecting synthesis
#[derive(Error, Debug)]
pub enum SynthesizerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// LLM synthesis was required but no backend is available
    #[error("LLM unavailable: {0}")]
    LlmUnavailable(String),
}

impl From<toml::de::Error> for SynthesizerError {
    fn from(e: toml::de::Error) -> Self {
        SynthesizerError::Config(format!("Failed to parse TOML: {}", e))
    }
}
