//! Policy rule records and partial patches.
//!
//! Rules are configuration only. They are stored and edited, but nothing in
//! the directory evaluates them against providers.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// An auto-approval policy rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRule {
    /// Stable identifier used by patches and the action journal.
    pub id: String,
    pub name: String,
    pub enabled: bool,
    pub auto_approve: bool,
    /// Risk ceiling on the 0–100 scale.
    pub risk_max: u8,
    /// Source names (e.g. "NPPES", "OIG/LEIE") a provider must pass.
    #[serde(default)]
    pub required_sources: BTreeSet<String>,
    pub if_any_fails_require_manual_review: bool,
}

/// A sparse set of field overrides for one `PolicyRule`, keyed by `id`.
///
/// Absent fields leave the rule untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRulePatch {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_approve: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_max: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_sources: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub if_any_fails_require_manual_review: Option<bool>,
}

impl PolicyRulePatch {
    /// An empty patch targeting `id`.
    pub fn for_rule(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// True when the patch carries no field overrides.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.enabled.is_none()
            && self.auto_approve.is_none()
            && self.risk_max.is_none()
            && self.required_sources.is_none()
            && self.if_any_fails_require_manual_review.is_none()
    }
}
