//! Error types for the extractors
//!
//! Transcript text never fails to extract; only rule configuration can.

use thiserror::Error;

/// Errors that can occur while preparing extraction
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// A signal pattern failed to compile as a regular expression
    #[error("Malformed pattern '{pattern}': {reason}")]
    MalformedPattern {
        /// Pattern as written in the rule document
        pattern: String,
        /// Compiler diagnostic
        reason: String,
    },

    /// Rule catalog could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::JsonParse(e.to_string())
    }
}

impl From<toml::de::Error> for ExtractorError {
    fn from(e: toml::de::Error) -> Self {
        ExtractorError::Config(e.to_string())
    }
}
