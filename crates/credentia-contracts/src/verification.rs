//! Per-provider verification views: checks, ledger entries and evidence items.
//!
//! None of these records are stored. They are rebuilt on every read from the
//! provider id and the current time.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{error::CredentiaError, parse_variant, provider::VerificationStatus};

/// One verification check run against an external source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCheck {
    /// Check name, e.g. "License Status".
    pub name: String,
    /// The source consulted, e.g. "State Medical Board".
    pub source: String,
    pub status: VerificationStatus,
    pub details: String,
    pub checked_at: DateTime<Utc>,
}

/// One entry of a provider's credentialing ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// `{provider_id}-l{n}`.
    pub id: String,
    /// Abbreviated transaction hash as shown to operators.
    pub tx_hash: String,
    /// Upper snake case action name, e.g. `VERIFICATION_RUN`.
    pub action: String,
    pub actor: String,
    pub timestamp: DateTime<Utc>,
    pub summary: String,
}

/// Evidence classification used when compiling a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceCategory {
    Identity,
    License,
    Sanctions,
    Enrollment,
    Audit,
}

impl EvidenceCategory {
    pub const ALL: [EvidenceCategory; 5] = [
        EvidenceCategory::Identity,
        EvidenceCategory::License,
        EvidenceCategory::Sanctions,
        EvidenceCategory::Enrollment,
        EvidenceCategory::Audit,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EvidenceCategory::Identity => "identity",
            EvidenceCategory::License => "license",
            EvidenceCategory::Sanctions => "sanctions",
            EvidenceCategory::Enrollment => "enrollment",
            EvidenceCategory::Audit => "audit",
        }
    }
}

impl fmt::Display for EvidenceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvidenceCategory {
    type Err = CredentiaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(&EvidenceCategory::ALL, EvidenceCategory::as_str, "evidence category", s)
    }
}

/// A single item of an evidence bundle.
///
/// Items come from three places: verification checks, ledger entries, and
/// the synthetic marker recording when the bundle itself was compiled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub id: String,
    pub provider_id: String,
    pub category: EvidenceCategory,
    pub title: String,
    pub source: String,
    pub status: VerificationStatus,
    pub timestamp: DateTime<Utc>,
    pub summary: String,
}

/// An exportable evidence bundle for one provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceBundle {
    pub provider_id: String,
    pub compiled_at: DateTime<Utc>,
    /// Newest first.
    pub items: Vec<EvidenceItem>,
}
