//! Evidence bundle compilation.
//!
//! A bundle merges a provider's verification checks and ledger entries into
//! one timeline of `EvidenceItem`s, adds a marker for the compilation itself,
//! and sorts the result newest first.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use credentia_contracts::{
    provider::VerificationStatus,
    verification::{EvidenceBundle, EvidenceCategory, EvidenceItem, LedgerEntry, VerificationCheck},
};

use crate::{
    checks::{verification_checks, SOURCE_DEA, SOURCE_NPPES, SOURCE_OIG_LEIE, SOURCE_STATE_BOARD},
    ledger::ledger_entries,
};

/// How long before `now` the compilation marker is stamped.
const BUNDLE_MARKER_AGE_MINUTES: i64 = 2;

/// Map a check source to its evidence category. Unknown sources are `Audit`.
pub fn category_for_source(source: &str) -> EvidenceCategory {
    match source {
        SOURCE_NPPES => EvidenceCategory::Identity,
        SOURCE_STATE_BOARD => EvidenceCategory::License,
        SOURCE_OIG_LEIE => EvidenceCategory::Sanctions,
        SOURCE_DEA => EvidenceCategory::Enrollment,
        _ => EvidenceCategory::Audit,
    }
}

fn check_item(provider_id: &str, idx: usize, check: &VerificationCheck) -> EvidenceItem {
    EvidenceItem {
        id: format!("{}-chk-{}", provider_id, idx + 1),
        provider_id: provider_id.to_string(),
        category: category_for_source(&check.source),
        title: check.name.clone(),
        source: check.source.clone(),
        status: check.status,
        timestamp: check.checked_at,
        summary: check.details.clone(),
    }
}

fn ledger_item(provider_id: &str, entry: &LedgerEntry) -> EvidenceItem {
    EvidenceItem {
        id: format!("{}-ev", entry.id),
        provider_id: provider_id.to_string(),
        category: EvidenceCategory::Audit,
        title: entry.action.clone(),
        source: entry.actor.clone(),
        status: VerificationStatus::Verified,
        timestamp: entry.timestamp,
        summary: format!("{} Tx {}", entry.summary, entry.tx_hash),
    }
}

/// Merge `checks` and `ledger` into a sorted evidence timeline.
///
/// The result always has `checks.len() + ledger.len() + 1` items, the extra
/// one being the bundle-compiled marker at `now - 2min`. Items with equal
/// timestamps keep their merge order (checks, then ledger, then marker).
pub fn merge_evidence(
    provider_id: &str,
    checks: &[VerificationCheck],
    ledger: &[LedgerEntry],
    now: DateTime<Utc>,
) -> Vec<EvidenceItem> {
    let mut items: Vec<EvidenceItem> = checks
        .iter()
        .enumerate()
        .map(|(idx, c)| check_item(provider_id, idx, c))
        .chain(ledger.iter().map(|e| ledger_item(provider_id, e)))
        .collect();

    items.push(EvidenceItem {
        id: format!("{}-bundle", provider_id),
        provider_id: provider_id.to_string(),
        category: EvidenceCategory::Audit,
        title: "Evidence bundle compiled".to_string(),
        source: "credentialing-service".to_string(),
        status: VerificationStatus::Verified,
        timestamp: now - Duration::minutes(BUNDLE_MARKER_AGE_MINUTES),
        summary: format!(
            "Bundle compiled from {} checks and {} ledger entries.",
            checks.len(),
            ledger.len()
        ),
    });

    items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    items
}

/// Evidence timeline for `provider_id` as of `now`.
pub fn evidence_for_provider(provider_id: &str, now: DateTime<Utc>) -> Vec<EvidenceItem> {
    let checks = verification_checks(provider_id, now);
    let ledger = ledger_entries(provider_id, now);
    let items = merge_evidence(provider_id, &checks, &ledger, now);

    debug!(
        provider_id = %provider_id,
        item_count = items.len(),
        "evidence timeline compiled"
    );

    items
}

/// Wrap the evidence timeline in an exportable bundle.
pub fn compile_bundle(provider_id: &str, now: DateTime<Utc>) -> EvidenceBundle {
    EvidenceBundle {
        provider_id: provider_id.to_string(),
        compiled_at: now,
        items: evidence_for_provider(provider_id, now),
    }
}
