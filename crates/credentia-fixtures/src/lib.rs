//! # credentia-fixtures
//!
//! Fictional seed data for the Credentia credentialing directory: four
//! providers, a handful of monitoring alerts, five source connectors, and the
//! default policy rule book.
//!
//! All data is hardcoded and fictional. No external systems are contacted.

pub mod mock_data;

use chrono::{DateTime, Utc};
use tracing::debug;

use credentia_contracts::error::CredentiaResult;
use credentia_core::DirectorySeed;
use credentia_policy::PolicyBook;

pub use mock_data::DEFAULT_POLICY_TOML;

/// Parse the bundled policy rule book.
pub fn default_policy_book() -> CredentiaResult<PolicyBook> {
    PolicyBook::from_toml_str(DEFAULT_POLICY_TOML)
}

/// Seed data timestamped relative to `now`, with the given policy rules.
pub fn directory_seed_with_policy(now: DateTime<Utc>, policy: PolicyBook) -> DirectorySeed {
    let seed = DirectorySeed {
        providers: mock_data::providers(now),
        alerts: mock_data::alerts(now),
        connectors: mock_data::connectors(now),
        policy_rules: policy.into_rules(),
    };
    debug!(
        providers = seed.providers.len(),
        alerts = seed.alerts.len(),
        connectors = seed.connectors.len(),
        policy_rules = seed.policy_rules.len(),
        "fixture seed built"
    );
    seed
}

/// Seed data timestamped relative to `now`, with the bundled policy rules.
pub fn directory_seed(now: DateTime<Utc>) -> CredentiaResult<DirectorySeed> {
    Ok(directory_seed_with_policy(now, default_policy_book()?))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
