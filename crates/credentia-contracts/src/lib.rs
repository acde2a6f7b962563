//! # credentia-contracts
//!
//! Shared types and error contracts for the Credentia credentialing directory.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate, only data definitions and error types.

pub mod alert;
pub mod connector;
pub mod error;
pub mod journal;
pub mod policy;
pub mod provider;
pub mod verification;

use error::CredentiaError;

/// Case-insensitive lookup of an enum variant by its wire name.
pub(crate) fn parse_variant<T: Copy>(
    all: &[T],
    name: fn(T) -> &'static str,
    kind: &'static str,
    raw: &str,
) -> Result<T, CredentiaError> {
    let wanted = raw.trim();
    all.iter()
        .copied()
        .find(|v| name(*v).eq_ignore_ascii_case(wanted))
        .ok_or_else(|| CredentiaError::UnknownVariant {
            kind,
            value: raw.to_string(),
        })
}
