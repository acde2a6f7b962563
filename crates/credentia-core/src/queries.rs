//! Read-side helpers over directory snapshots: search, KPI counts and
//! profile neighbours.
//!
//! These operate on snapshots returned by the store, never on the store's
//! own collections.

use serde::Serialize;

use credentia_contracts::{
    alert::AlertItem,
    provider::{Provider, VerificationStatus},
};

/// Trimmed, lower-cased search needle. `None` means "match everything".
fn needle(query: &str) -> Option<String> {
    let q = query.trim().to_lowercase();
    (!q.is_empty()).then_some(q)
}

fn any_contains(haystack: &[&str], needle: &str) -> bool {
    haystack.iter().any(|v| v.to_lowercase().contains(needle))
}

/// Providers whose name, NPI, specialty, organization or state contains
/// `query` (case-insensitive). A blank query returns every provider.
pub fn filter_providers(providers: &[Provider], query: &str) -> Vec<Provider> {
    let Some(q) = needle(query) else {
        return providers.to_vec();
    };
    providers
        .iter()
        .filter(|p| {
            any_contains(
                &[
                    p.full_name.as_str(),
                    p.npi.as_str(),
                    p.specialty.as_str(),
                    p.organization.as_str(),
                    p.state.as_str(),
                ],
                &q,
            )
        })
        .cloned()
        .collect()
}

/// Alerts whose title, source, severity, status or details contains
/// `query` (case-insensitive). A blank query returns every alert.
pub fn filter_alerts(alerts: &[AlertItem], query: &str) -> Vec<AlertItem> {
    let Some(q) = needle(query) else {
        return alerts.to_vec();
    };
    alerts
        .iter()
        .filter(|a| {
            any_contains(
                &[
                    a.title.as_str(),
                    a.source.as_str(),
                    a.severity.as_str(),
                    a.status.as_str(),
                    a.details.as_str(),
                ],
                &q,
            )
        })
        .cloned()
        .collect()
}

/// Dashboard KPI counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub total: usize,
    pub verified: usize,
    pub warning: usize,
    pub failed: usize,
    pub pending: usize,
}

pub fn status_counts(providers: &[Provider]) -> StatusCounts {
    providers
        .iter()
        .fold(StatusCounts::default(), |mut counts, p| {
            counts.total += 1;
            match p.status {
                VerificationStatus::Verified => counts.verified += 1,
                VerificationStatus::Warning => counts.warning += 1,
                VerificationStatus::Failed => counts.failed += 1,
                VerificationStatus::Pending => counts.pending += 1,
            }
            counts
        })
}

/// Full name for `provider_id`, or the id itself when it is not listed.
pub fn provider_display_name(providers: &[Provider], provider_id: &str) -> String {
    providers
        .iter()
        .find(|p| p.id == provider_id)
        .map(|p| p.full_name.clone())
        .unwrap_or_else(|| provider_id.to_string())
}

/// The providers before and after `provider_id` in listing order.
///
/// Both are `None` when the id is not listed.
pub fn neighbours<'a>(
    providers: &'a [Provider],
    provider_id: &str,
) -> (Option<&'a Provider>, Option<&'a Provider>) {
    match providers.iter().position(|p| p.id == provider_id) {
        Some(idx) => (
            idx.checked_sub(1).and_then(|i| providers.get(i)),
            providers.get(idx + 1),
        ),
        None => (None, None),
    }
}
