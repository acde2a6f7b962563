//! Provider identity and credentialing status types.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{error::CredentiaError, parse_variant};

/// Highest value a provider risk score or policy risk ceiling may take.
pub const MAX_RISK_SCORE: u8 = 100;

/// Outcome of a credentialing verification, shared by providers, checks and
/// evidence items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Verified,
    Warning,
    Failed,
    Pending,
}

impl VerificationStatus {
    pub const ALL: [VerificationStatus; 4] = [
        VerificationStatus::Verified,
        VerificationStatus::Warning,
        VerificationStatus::Failed,
        VerificationStatus::Pending,
    ];

    /// Wire name, e.g. `"warning"`.
    pub fn as_str(self) -> &'static str {
        match self {
            VerificationStatus::Verified => "verified",
            VerificationStatus::Warning => "warning",
            VerificationStatus::Failed => "failed",
            VerificationStatus::Pending => "pending",
        }
    }

    /// Operator-facing label. `Warning` reads as "Needs Attention".
    pub fn label(self) -> &'static str {
        match self {
            VerificationStatus::Verified => "Verified",
            VerificationStatus::Warning => "Needs Attention",
            VerificationStatus::Failed => "Failed",
            VerificationStatus::Pending => "Pending",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerificationStatus {
    type Err = CredentiaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(&VerificationStatus::ALL, VerificationStatus::as_str, "verification status", s)
    }
}

/// A healthcare provider under credentialing.
///
/// `id` is the directory key and is unique across the provider collection.
/// `npi` is the 10-digit National Provider Identifier; it is displayed and
/// matched by string but never validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub id: String,
    pub npi: String,
    pub full_name: String,
    pub specialty: String,
    pub organization: String,
    /// Two-letter region code, e.g. "NC".
    pub state: String,
    pub last_verified_at: DateTime<Utc>,
    pub status: VerificationStatus,
    /// Risk on a 0–100 scale. Mutators keep it inside that range.
    pub risk_score: u8,
}
