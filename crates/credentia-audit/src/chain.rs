//! Hash-chain primitives: hashing and chain integrity verification.
//!
//! Hash input layout (bytes, in order):
//!   1. journal_id as UTF-8 bytes
//!   2. sequence as 8-byte little-endian
//!   3. prev_hash as UTF-8 bytes (64 ASCII hex chars)
//!   4. recorded_at as RFC 3339 with nanoseconds, UTF-8
//!   5. canonical JSON of the action (serde_json, no pretty-printing)

use chrono::{DateTime, SecondsFormat, Utc};
use sha2::{Digest, Sha256};

use credentia_contracts::{
    error::{CredentiaError, CredentiaResult},
    journal::StoreAction,
};

use crate::entry::JournalEntry;

/// Compute the SHA-256 hash of one journal entry as lowercase hex.
pub fn hash_entry(
    journal_id: &str,
    sequence: u64,
    action: &StoreAction,
    recorded_at: DateTime<Utc>,
    prev_hash: &str,
) -> CredentiaResult<String> {
    let action_json = serde_json::to_vec(action).map_err(|e| CredentiaError::Serialization {
        reason: format!("failed to serialize {} action: {}", action.kind(), e),
    })?;

    let mut hasher = Sha256::new();
    hasher.update(journal_id.as_bytes());
    hasher.update(sequence.to_le_bytes());
    hasher.update(prev_hash.as_bytes());
    hasher.update(recorded_at.to_rfc3339_opts(SecondsFormat::Nanos, true).as_bytes());
    hasher.update(&action_json);

    Ok(hex::encode(hasher.finalize()))
}

/// Verify the integrity of a hash chain.
///
/// Valid when every entry links to its predecessor (entry 0 to
/// `GENESIS_HASH`), sequences run 0, 1, 2, …, and every `this_hash` matches
/// the value recomputed from the entry's fields. An empty chain is valid.
pub fn verify_chain(entries: &[JournalEntry]) -> bool {
    let mut expected_prev = JournalEntry::GENESIS_HASH.to_string();

    for (idx, entry) in entries.iter().enumerate() {
        if entry.sequence != idx as u64 || entry.prev_hash != expected_prev {
            return false;
        }

        let recomputed = hash_entry(
            &entry.journal_id,
            entry.sequence,
            &entry.action,
            entry.recorded_at,
            &entry.prev_hash,
        );
        match recomputed {
            Ok(hash) if hash == entry.this_hash => {}
            _ => return false,
        }

        expected_prev = entry.this_hash.clone();
    }

    true
}
