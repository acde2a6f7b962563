//! Policy rule book loading.
//!
//! A `PolicyBook` is deserialized from TOML and holds the ordered list of
//! `PolicyRule`s the directory is seeded with. Loading validates the rules;
//! nothing here evaluates them against providers.

use std::{collections::HashSet, path::Path};

use serde::{Deserialize, Serialize};
use tracing::debug;

use credentia_contracts::{
    error::{CredentiaError, CredentiaResult},
    policy::PolicyRule,
    provider::MAX_RISK_SCORE,
};

/// The top-level structure deserialized from a TOML policy file.
///
/// Example:
/// ```toml
/// [[rules]]
/// id = "pr-1"
/// name = "Low-risk auto-approval"
/// enabled = true
/// auto_approve = true
/// risk_max = 30
/// required_sources = ["NPPES", "State Medical Board", "OIG/LEIE"]
/// if_any_fails_require_manual_review = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyBook {
    /// Rules in declaration order.
    #[serde(default)]
    pub rules: Vec<PolicyRule>,
}

impl PolicyBook {
    /// Parse `s` as TOML and validate the resulting rules.
    ///
    /// Returns `CredentiaError::ConfigError` if the TOML is malformed, a rule
    /// id repeats, or a `risk_max` exceeds 100.
    pub fn from_toml_str(s: &str) -> CredentiaResult<Self> {
        let book: PolicyBook = toml::from_str(s).map_err(|e| CredentiaError::ConfigError {
            reason: format!("failed to parse policy TOML: {}", e),
        })?;
        book.validate()?;

        debug!(rule_count = book.rules.len(), "policy rule book loaded");
        Ok(book)
    }

    /// Read the file at `path` and parse it as a policy rule book.
    pub fn from_file(path: &Path) -> CredentiaResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| CredentiaError::ConfigError {
            reason: format!("failed to read policy file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Serialize back to TOML, e.g. to dump the live rule set.
    pub fn to_toml_string(&self) -> CredentiaResult<String> {
        toml::to_string_pretty(self).map_err(|e| CredentiaError::Serialization {
            reason: format!("failed to render policy TOML: {}", e),
        })
    }

    fn validate(&self) -> CredentiaResult<()> {
        let mut seen = HashSet::new();
        for rule in &self.rules {
            if !seen.insert(rule.id.as_str()) {
                return Err(CredentiaError::ConfigError {
                    reason: format!("duplicate policy rule id '{}'", rule.id),
                });
            }
            if rule.risk_max > MAX_RISK_SCORE {
                return Err(CredentiaError::ConfigError {
                    reason: format!(
                        "rule '{}' has risk_max {} above the {} ceiling",
                        rule.id, rule.risk_max, MAX_RISK_SCORE
                    ),
                });
            }
        }
        Ok(())
    }

    pub fn into_rules(self) -> Vec<PolicyRule> {
        self.rules
    }
}
