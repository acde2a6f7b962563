//! # credentia-audit
//!
//! Append-only, SHA-256 hash-chained journal of directory mutations.
//!
//! ## Overview
//!
//! Every mutation the `ProviderDirectoryStore` applies is handed to its
//! `ActionJournal`. [`InMemoryJournal`] wraps each `StoreAction` in a
//! [`JournalEntry`] linked to the previous entry by hash, so editing any
//! recorded action is detected by [`verify_chain`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use credentia_audit::InMemoryJournal;
//!
//! let journal = Arc::new(InMemoryJournal::new());
//! let store = ProviderDirectoryStore::new(seed, clock, probe).with_journal(Box::new(journal.clone()));
//! store.mock_approve("p-1003");
//!
//! assert!(journal.verify_integrity());
//! let export = journal.export();
//! ```

pub mod chain;
pub mod entry;
pub mod memory;

pub use chain::{hash_entry, verify_chain};
pub use entry::{JournalEntry, JournalExport};
pub use memory::InMemoryJournal;

// ── Tests ─────────────────────────────────────────────────────────────────────
