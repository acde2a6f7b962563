//! # credentia-evidence
//!
//! Per-provider derived views for the Credentia directory: verification
//! checks, the credentialing ledger, and the evidence bundle that merges them.
//!
//! Every builder is a pure function of `(provider_id, now)`. Callers inject
//! `now`; nothing here reads the system clock, so two calls with the same
//! arguments always agree.
//!
//! ```rust,ignore
//! use credentia_evidence::{evidence_for_provider, verification_checks};
//!
//! let now = chrono::Utc::now();
//! let checks = verification_checks("p-1003", now);
//! let bundle = evidence_for_provider("p-1003", now);
//! ```

pub mod bundle;
pub mod checks;
pub mod ledger;

pub use bundle::{category_for_source, compile_bundle, evidence_for_provider, merge_evidence};
pub use checks::{base_checks, verification_checks};
pub use ledger::{ledger_entries, LEDGER_LEN};

// ── Tests ─────────────────────────────────────────────────────────────────────
