//! Error types for the fallible edges of the credentialing directory.
//!
//! Store operations themselves never fail: unknown ids degrade to no-ops or
//! empty results. Errors only arise when loading configuration, parsing
//! operator input, or writing to the action journal.

use thiserror::Error;

/// The unified error type for Credentia crates.
#[derive(Debug, Error)]
pub enum CredentiaError {
    /// A configuration document (e.g. the policy rule TOML) is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// A textual value did not name any variant of the expected enum.
    #[error("unknown {kind} '{value}'")]
    UnknownVariant { kind: &'static str, value: String },

    /// The action journal could not append an entry.
    #[error("journal write failed: {reason}")]
    JournalWriteFailed { reason: String },

    /// A record could not be serialized for output or hashing.
    #[error("serialization error: {reason}")]
    Serialization { reason: String },
}

/// Convenience alias used throughout the Credentia crates.
pub type CredentiaResult<T> = Result<T, CredentiaError>;
