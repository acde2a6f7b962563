//! Credentialing ledger builder.
//!
//! The ledger is regenerated on every read: three entries at fixed offsets
//! from `now`, parameterized only by the provider id. Nothing is persisted,
//! so two reads at different times return different timestamps.

use chrono::{DateTime, Duration, Utc};

use credentia_contracts::verification::LedgerEntry;

/// Number of entries every ledger contains.
pub const LEDGER_LEN: usize = 3;

/// (tx hash, action, actor, minutes before `now`, summary)
const LEDGER_TEMPLATE: [(&str, &str, &str, i64, &str); LEDGER_LEN] = [
    (
        "0x8f3c...a91d",
        "VERIFICATION_RUN",
        "ai-agent:verifier",
        18,
        "Automated verification executed across 4 sources.",
    ),
    (
        "0x21b9...c032",
        "CREDENTIAL_UPDATE",
        "ops:credentialing-team",
        45,
        "Updated practice location and payer enrollment metadata.",
    ),
    (
        "0x9c02...11ef",
        "ATTESTATION_SIGNED",
        "provider",
        90,
        "Provider attestation signed and anchored to ledger.",
    ),
];

/// Ledger entries for `provider_id` as of `now`, most recent first.
pub fn ledger_entries(provider_id: &str, now: DateTime<Utc>) -> Vec<LedgerEntry> {
    LEDGER_TEMPLATE
        .iter()
        .enumerate()
        .map(|(idx, (tx_hash, action, actor, minutes, summary))| LedgerEntry {
            id: format!("{}-l{}", provider_id, idx + 1),
            tx_hash: tx_hash.to_string(),
            action: action.to_string(),
            actor: actor.to_string(),
            timestamp: now - Duration::minutes(*minutes),
            summary: summary.to_string(),
        })
        .collect()
}
