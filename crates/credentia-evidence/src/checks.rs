//! Verification check builder.
//!
//! Every provider gets the same four checks, one per credentialing source.
//! A small override table then makes individual providers diverge so the
//! directory has something to triage.

use chrono::{DateTime, Duration, Utc};

use credentia_contracts::{provider::VerificationStatus, verification::VerificationCheck};

pub const NPI_REGISTRY_MATCH: &str = "NPI Registry Match";
pub const LICENSE_STATUS: &str = "License Status";
pub const SANCTIONS_SCREENING: &str = "Sanctions Screening";
pub const DEA_REGISTRATION: &str = "DEA Registration";

pub const SOURCE_NPPES: &str = "NPPES";
pub const SOURCE_STATE_BOARD: &str = "State Medical Board";
pub const SOURCE_OIG_LEIE: &str = "OIG/LEIE";
pub const SOURCE_DEA: &str = "DEA";

/// (name, source, status, details, minutes before `now`)
const BASE_CHECKS: [(&str, &str, VerificationStatus, &str, i64); 4] = [
    (
        NPI_REGISTRY_MATCH,
        SOURCE_NPPES,
        VerificationStatus::Verified,
        "Name and NPI match. Practice location verified.",
        8,
    ),
    (
        LICENSE_STATUS,
        SOURCE_STATE_BOARD,
        VerificationStatus::Verified,
        "Active license found. No disciplinary actions detected.",
        12,
    ),
    (
        SANCTIONS_SCREENING,
        SOURCE_OIG_LEIE,
        VerificationStatus::Verified,
        "No matches found.",
        15,
    ),
    (
        DEA_REGISTRATION,
        SOURCE_DEA,
        VerificationStatus::Pending,
        "Awaiting confirmation from external service.",
        3,
    ),
];

/// A per-provider replacement for one check's status and details.
struct CheckOverride {
    provider_id: &'static str,
    check_name: &'static str,
    status: VerificationStatus,
    details: &'static str,
}

const OVERRIDES: [CheckOverride; 2] = [
    CheckOverride {
        provider_id: "p-1001",
        check_name: DEA_REGISTRATION,
        status: VerificationStatus::Warning,
        details: "DEA expiring soon. Renewal window flagged.",
    },
    CheckOverride {
        provider_id: "p-1003",
        check_name: LICENSE_STATUS,
        status: VerificationStatus::Failed,
        details: "License not found for supplied state. Manual review needed.",
    },
];

/// The four checks every provider starts from, timestamped relative to `now`.
pub fn base_checks(now: DateTime<Utc>) -> Vec<VerificationCheck> {
    BASE_CHECKS
        .iter()
        .map(|(name, source, status, details, minutes)| VerificationCheck {
            name: name.to_string(),
            source: source.to_string(),
            status: *status,
            details: details.to_string(),
            checked_at: now - Duration::minutes(*minutes),
        })
        .collect()
}

/// Verification checks for `provider_id` as of `now`.
///
/// Unknown provider ids get the base set unchanged.
pub fn verification_checks(provider_id: &str, now: DateTime<Utc>) -> Vec<VerificationCheck> {
    let mut checks = base_checks(now);
    for ov in OVERRIDES.iter().filter(|o| o.provider_id == provider_id) {
        for check in checks.iter_mut().filter(|c| c.name == ov.check_name) {
            check.status = ov.status;
            check.details = ov.details.to_string();
        }
    }
    checks
}
