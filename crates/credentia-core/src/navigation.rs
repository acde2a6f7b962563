//! Profile routing contracts: tab names and NPI resolution.

use std::fmt;

use credentia_contracts::provider::Provider;

/// The tabs of a provider profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ProfileTab {
    #[default]
    Overview,
    Checks,
    Ledger,
    Evidence,
}

impl ProfileTab {
    pub const ALL: [ProfileTab; 4] = [
        ProfileTab::Overview,
        ProfileTab::Checks,
        ProfileTab::Ledger,
        ProfileTab::Evidence,
    ];

    /// Parse a `tab` query value. Missing or unrecognized values fall back
    /// to `Overview`; matching ignores case but not surrounding whitespace.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return ProfileTab::Overview;
        };
        let wanted = raw.to_lowercase();
        ProfileTab::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProfileTab::Overview => "overview",
            ProfileTab::Checks => "checks",
            ProfileTab::Ledger => "ledger",
            ProfileTab::Evidence => "evidence",
        }
    }

    pub fn index(self) -> usize {
        match self {
            ProfileTab::Overview => 0,
            ProfileTab::Checks => 1,
            ProfileTab::Ledger => 2,
            ProfileTab::Evidence => 3,
        }
    }

    /// Inverse of `index`. Anything past the last tab maps to `Evidence`.
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => ProfileTab::Overview,
            1 => ProfileTab::Checks,
            2 => ProfileTab::Ledger,
            _ => ProfileTab::Evidence,
        }
    }
}

impl fmt::Display for ProfileTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an NPI deep link lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NpiRoute {
    /// `/provider/{id}?tab=overview`
    Profile { provider_id: String, tab: ProfileTab },
    /// The NPI matched nobody; go back to the dashboard.
    Root,
}

/// Find the provider whose NPI equals `npi` after trimming whitespace.
pub fn resolve_npi<'a>(providers: &'a [Provider], npi: &str) -> Option<&'a Provider> {
    let npi = npi.trim();
    providers.iter().find(|p| p.npi == npi)
}

pub fn route_for_npi(providers: &[Provider], npi: &str) -> NpiRoute {
    match resolve_npi(providers, npi) {
        Some(p) => NpiRoute::Profile {
            provider_id: p.id.clone(),
            tab: ProfileTab::Overview,
        },
        None => NpiRoute::Root,
    }
}
