//! Journal entry and export types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use credentia_contracts::journal::StoreAction;

/// One link of the journal's hash chain.
///
/// Changing any field, including the embedded `action`, invalidates
/// `this_hash` and every later `prev_hash`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Position in the chain, starting at 0.
    pub sequence: u64,
    pub journal_id: String,
    pub action: StoreAction,
    /// Store clock time at which the action was applied.
    pub recorded_at: DateTime<Utc>,
    /// `this_hash` of the previous entry, or `GENESIS_HASH` for entry 0.
    pub prev_hash: String,
    pub this_hash: String,
}

impl JournalEntry {
    /// The `prev_hash` of the first entry in every journal.
    pub const GENESIS_HASH: &'static str =
        "0000000000000000000000000000000000000000000000000000000000000000";
}

/// A point-in-time copy of a journal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalExport {
    pub journal_id: String,
    /// Chain order, sequence 0 first.
    pub entries: Vec<JournalEntry>,
    pub exported_at: DateTime<Utc>,
    /// `this_hash` of the last entry; empty when the journal is empty.
    pub terminal_hash: String,
}
