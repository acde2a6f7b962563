//! In-memory implementation of `ActionJournal`.
//!
//! `InMemoryJournal` keeps every entry in a `Vec` behind a `Mutex`. Use
//! `export()` to take a sealed copy and `verify_integrity()` to confirm the
//! chain has not been altered in memory.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tracing::debug;

use credentia_contracts::{
    error::{CredentiaError, CredentiaResult},
    journal::StoreAction,
};
use credentia_core::traits::ActionJournal;

use crate::{
    chain::{hash_entry, verify_chain},
    entry::{JournalEntry, JournalExport},
};

pub(crate) struct JournalState {
    pub(crate) entries: Vec<JournalEntry>,
    /// `this_hash` of the last entry, or `GENESIS_HASH` before the first.
    pub(crate) last_hash: String,
}

/// An append-only journal backed by a SHA-256 hash chain.
pub struct InMemoryJournal {
    journal_id: String,
    pub(crate) state: Arc<Mutex<JournalState>>,
}

impl InMemoryJournal {
    /// A journal with a fresh random id.
    pub fn new() -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string())
    }

    pub fn with_id(journal_id: impl Into<String>) -> Self {
        Self {
            journal_id: journal_id.into(),
            state: Arc::new(Mutex::new(JournalState {
                entries: Vec::new(),
                last_hash: JournalEntry::GENESIS_HASH.to_string(),
            })),
        }
    }

    pub fn journal_id(&self) -> &str {
        &self.journal_id
    }

    fn lock(&self) -> MutexGuard<'_, JournalState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries whose action touched `subject_id`, in chain order.
    pub fn entries_for(&self, subject_id: &str) -> Vec<JournalEntry> {
        self.lock()
            .entries
            .iter()
            .filter(|e| e.action.subject_id() == subject_id)
            .cloned()
            .collect()
    }

    /// Sealed copy of everything written so far.
    pub fn export(&self) -> JournalExport {
        let state = self.lock();
        JournalExport {
            journal_id: self.journal_id.clone(),
            entries: state.entries.clone(),
            exported_at: Utc::now(),
            terminal_hash: state
                .entries
                .last()
                .map(|e| e.this_hash.clone())
                .unwrap_or_default(),
        }
    }

    pub fn verify_integrity(&self) -> bool {
        verify_chain(&self.lock().entries)
    }
}

impl Default for InMemoryJournal {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionJournal for InMemoryJournal {
    /// Append `action` to the chain.
    ///
    /// Fails with `JournalWriteFailed` only if the action cannot be hashed;
    /// in that case nothing is appended.
    fn record(&self, action: &StoreAction, at: DateTime<Utc>) -> CredentiaResult<()> {
        let mut state = self.lock();

        let sequence = state.entries.len() as u64;
        let prev_hash = state.last_hash.clone();
        let this_hash = hash_entry(&self.journal_id, sequence, action, at, &prev_hash).map_err(|e| {
            CredentiaError::JournalWriteFailed {
                reason: e.to_string(),
            }
        })?;

        debug!(
            journal_id = %self.journal_id,
            sequence,
            kind = action.kind(),
            subject_id = %action.subject_id(),
            "journal entry appended"
        );

        state.entries.push(JournalEntry {
            sequence,
            journal_id: self.journal_id.clone(),
            action: action.clone(),
            recorded_at: at,
            prev_hash,
            this_hash: this_hash.clone(),
        });
        state.last_hash = this_hash;

        Ok(())
    }
}
