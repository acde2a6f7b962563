//! # credentia-policy
//!
//! Credentialing policy rules for the Credentia directory.
//!
//! ## Overview
//!
//! Rules are declared in a TOML file and loaded into a [`PolicyBook`]. The
//! directory stores them and lets operators edit them through sparse
//! patches ([`apply_patch`]). Rules are configuration only: no engine applies
//! them to providers.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use credentia_policy::PolicyBook;
//!
//! let book = PolicyBook::from_file(Path::new("policies/credentialing.toml"))?;
//! ```

pub mod book;
pub mod patch;

pub use book::PolicyBook;
pub use patch::{apply_patch, parse_risk_max};

// ── Tests ─────────────────────────────────────────────────────────────────────
