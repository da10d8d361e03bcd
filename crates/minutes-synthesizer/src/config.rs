//! Configuration for the synthesizers

use crate::error::SynthesizerError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Items produced per call when the caller does not say
pub const DEFAULT_MAX_ITEMS: usize = 10;

/// Upper bound on items per call
pub const MAX_ITEMS_LIMIT: usize = 50;

/// Name of the single synthesized Gherkin feature
pub const DEFAULT_FEATURE_NAME: &str = "Meeting requirements";

/// Clamp a requested item count into `1..=50`, defaulting to 10
pub fn clamp_max_items(requested: Option<usize>) -> usize {
    requested
        .unwrap_or(DEFAULT_MAX_ITEMS)
        .clamp(1, MAX_ITEMS_LIMIT)
}

/// How synthesis should be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SynthesisMode {
    /// Use an LLM backend when one is configured, else deterministic
    #[default]
    Auto,
    /// Never call an LLM
    Deterministic,
    /// Require an LLM backend
    Llm,
}

impl SynthesisMode {
    /// Get the mode name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            SynthesisMode::Auto => "auto",
            SynthesisMode::Deterministic => "deterministic",
            SynthesisMode::Llm => "llm",
        }
    }

    /// Parse a mode name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(SynthesisMode::Auto),
            "deterministic" => Some(SynthesisMode::Deterministic),
            "llm" => Some(SynthesisMode::Llm),
            _ => None,
        }
    }
}

impl std::fmt::Display for SynthesisMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SynthesisMode {
    type Err = SynthesizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| SynthesizerError::Config(format!("Unknown synthesis mode: {}", s)))
    }
}

/// Configuration for the synthesizers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesizerConfig {
    /// Maximum stories or scenarios per call (1 to 50)
    pub max_items: usize,

    /// Name given to the synthesized Gherkin feature
    pub feature_name: String,

    /// Synthesis mode
    pub mode: SynthesisMode,
}

impl SynthesizerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_items == 0 {
            return Err("max_items must be greater than 0".to_string());
        }
        if self.max_items > MAX_ITEMS_LIMIT {
            return Err(format!("max_items cannot exceed {}", MAX_ITEMS_LIMIT));
        }
        if self.feature_name.trim().is_empty() {
            return Err("feature_name must not be empty".to_string());
        }
        Ok(())
    }

    /// Deterministic preset: never reaches for an LLM
    pub fn deterministic() -> Self {
        Self {
            mode: SynthesisMode::Deterministic,
            ..Self::default()
        }
    }

    /// Copy of this config with a per-call item limit applied
    pub fn with_max_items(&self, requested: Option<usize>) -> Self {
        Self {
            max_items: clamp_max_items(requested.or(Some(self.max_items))),
            ..self.clone()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, SynthesizerError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate().map_err(SynthesizerError::Config)?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, SynthesizerError> {
        toml::to_string_pretty(self)
            .map_err(|e| SynthesizerError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

impl Default for SynthesizerConfig {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            feature_name: DEFAULT_FEATURE_NAME.to_string(),
            mode: SynthesisMode::Auto,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_max_items() {
        assert_eq!(clamp_max_items(None), 10);
        assert_eq!(clamp_max_items(Some(0)), 1);
        assert_eq!(clamp_max_items(Some(7)), 7);
        assert_eq!(clamp_max_items(Some(500)), 50);
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = SynthesizerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.feature_name, "Meeting requirements");
        assert_eq!(config.mode, SynthesisMode::Auto);
    }

    #[test]
    fn test_invalid_configs() {
        let mut config = SynthesizerConfig::default();
        config.max_items = 0;
        assert!(config.validate().is_err());

        config.max_items = 51;
        assert!(config.validate().is_err());

        let mut config = SynthesizerConfig::default();
        config.feature_name = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_with_max_items() {
        let config = SynthesizerConfig::deterministic();
        assert_eq!(config.with_max_items(Some(99)).max_items, 50);
        assert_eq!(config.with_max_items(None).max_items, 10);
        assert_eq!(config.with_max_items(None).mode, SynthesisMode::Deterministic);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("LLM".parse::<SynthesisMode>().unwrap(), SynthesisMode::Llm);
        assert_eq!(SynthesisMode::parse("deterministic"), Some(SynthesisMode::Deterministic));
        assert!("sometimes".parse::<SynthesisMode>().is_err());
        assert_eq!(SynthesisMode::Auto.to_string(), "auto");
    }

    #[test]
    fn test_toml_round_trip() {
        let config = SynthesizerConfig {
            max_items: 3,
            feature_name: "Search".to_string(),
            mode: SynthesisMode::Deterministic,
        };
        let toml_str = config.to_toml().unwrap();
        let parsed = SynthesizerConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = SynthesizerConfig::from_toml("mode = \"llm\"").unwrap();
        assert_eq!(config.mode, SynthesisMode::Llm);
        assert_eq!(config.max_items, 10);

        assert!(SynthesizerConfig::from_toml("max_items = 0").is_err());
        assert!(SynthesizerConfig::from_toml("mode = \"never\"").is_err());
    }
}
