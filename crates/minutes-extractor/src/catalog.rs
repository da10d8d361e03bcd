//! Tenant rule catalog
//!
//! A catalog document replaces the built-in signal rules for one tenant:
//!
//! ```json
//! {
//!   "version": 1,
//!   "extractionRules": [
//!     { "type": "Risk", "confidence": "high", "patterns": ["^security\\s*:"] }
//!   ]
//! }
//! ```
//!
//! Replacement is all-or-nothing. A document that does not fit the schema
//! or has no rules means "use the defaults"; a pattern that does not
//! compile fails the whole document.

use crate::error::ExtractorError;
use crate::rules::{compile_pattern, RuleSet, SignalRule};
use crate::types::SignalType;
use minutes_domain::Confidence;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// Catalog version marker (informational)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CatalogVersion {
    /// `"version": 1`
    Number(i64),
    /// `"version": "2024-06"`
    Text(String),
}

/// A rule as written in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    /// Signal type assigned on match
    #[serde(rename = "type")]
    pub signal_type: SignalType,

    /// Confidence assigned on match
    pub confidence: Confidence,

    /// Pattern strings, plain or `/body/flags`
    pub patterns: Vec<String>,
}

/// Tenant signal configuration document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalCatalog {
    /// Document version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<CatalogVersion>,

    /// Rules in priority order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extraction_rules: Option<Vec<RuleSpec>>,
}

impl SignalCatalog {
    /// Parse from an already-decoded JSON value
    pub fn from_json_value(value: &Value) -> Result<Self, ExtractorError> {
        Ok(Self::deserialize(value)?)
    }

    /// Parse from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, ExtractorError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ExtractorError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Compile into a rule set
    ///
    /// Returns `Ok(None)` when the catalog has no rules.
    pub fn compile(&self) -> Result<Option<RuleSet>, ExtractorError> {
        let written = match &self.extraction_rules {
            Some(written) if !written.is_empty() => written,
            _ => return Ok(None),
        };

        let mut rules = Vec::with_capacity(written.len());
        for rule in written {
            let patterns = rule
                .patterns
                .iter()
                .map(|p| compile_pattern(p))
                .collect::<Result<Vec<_>, _>>()?;
            rules.push(SignalRule::new(rule.signal_type, rule.confidence, patterns));
        }

        debug!("Compiled {} signal rules from catalog", rules.len());
        Ok(Some(RuleSet::new(rules)))
    }
}

/// Compile a tenant catalog document into a rule set
///
/// - `Ok(Some(rules))`: use these rules instead of the defaults
/// - `Ok(None)`: document absent, off-schema or empty; use the defaults
/// - `Err(MalformedPattern)`: a pattern failed to compile
pub fn compile_rules(document: Option<&Value>) -> Result<Option<RuleSet>, ExtractorError> {
    let Some(document) = document else {
        return Ok(None);
    };

    match SignalCatalog::from_json_value(document) {
        Ok(catalog) => catalog.compile(),
        Err(e) => {
            warn!("Ignoring signal catalog, falling back to default rules: {}", e);
            Ok(None)
        }
    }
}
