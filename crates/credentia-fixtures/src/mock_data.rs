//! Simulated credentialing data for the Credentia directory.
//!
//! All data in this module is hardcoded and fictional. Timestamps are
//! expressed relative to the `now` passed in, so a freshly seeded directory
//! always looks recently active.

use chrono::{DateTime, Duration, Utc};

use credentia_contracts::{
    alert::{AlertItem, AlertSeverity, AlertStatus},
    connector::{Connector, ConnectorStatus},
    provider::{Provider, VerificationStatus},
};
use credentia_core::probe::notes_for;

/// Default policy rule book, parsed by `credentia-policy`.
pub const DEFAULT_POLICY_TOML: &str = include_str!("../policies/credentialing.toml");

// ── Providers ─────────────────────────────────────────────────────────────────

/// The four seeded providers, in dashboard order.
pub fn providers(now: DateTime<Utc>) -> Vec<Provider> {
    // (id, npi, name, specialty, organization, state, minutes since verified, status, risk)
    let rows = [
        ("p-1001", "1457398921", "Dr. Aisha Patel", "Internal Medicine", "Triangle Health Partners", "NC", 45, VerificationStatus::Warning, 62),
        ("p-1002", "1881749203", "Dr. Michael Chen", "Cardiology", "Blue Ridge Heart Center", "VA", 10, VerificationStatus::Verified, 18),
        ("p-1003", "1093764450", "Dr. Sofia Ramirez", "Pediatrics", "Capital Kids Clinic", "TX", 200, VerificationStatus::Failed, 91),
        ("p-1004", "1679530212", "Dr. James Wilson", "Family Medicine", "Raleigh Care Network", "NC", 5, VerificationStatus::Pending, 44),
    ];

    rows.into_iter()
        .map(|(id, npi, name, specialty, org, state, minutes, status, risk)| Provider {
            id: id.to_string(),
            npi: npi.to_string(),
            full_name: name.to_string(),
            specialty: specialty.to_string(),
            organization: org.to_string(),
            state: state.to_string(),
            last_verified_at: now - Duration::minutes(minutes),
            status,
            risk_score: risk,
        })
        .collect()
}

// ── Alerts ────────────────────────────────────────────────────────────────────

pub fn alerts(now: DateTime<Utc>) -> Vec<AlertItem> {
    let alert = |id: &str,
                 provider_id: &str,
                 title: &str,
                 severity: AlertSeverity,
                 source: &str,
                 minutes_ago: i64,
                 details: &str,
                 recommended_action: &str,
                 status: AlertStatus| AlertItem {
        id: id.to_string(),
        provider_id: provider_id.to_string(),
        title: title.to_string(),
        severity,
        source: source.to_string(),
        created_at: now - Duration::minutes(minutes_ago),
        details: details.to_string(),
        recommended_action: recommended_action.to_string(),
        status,
    };

    vec![
        alert(
            "a-1",
            "p-1003",
            "License not found in state board",
            AlertSeverity::Critical,
            "State Medical Board",
            22,
            "No active license for the supplied state was returned by the board lookup.",
            "Request license documentation and re-run the board check manually.",
            AlertStatus::Open,
        ),
        alert(
            "a-2",
            "p-1001",
            "DEA registration expiring",
            AlertSeverity::Medium,
            "DEA",
            65,
            "Registration expires within the 60-day renewal window.",
            "Notify the provider and track renewal confirmation.",
            AlertStatus::Open,
        ),
        alert(
            "a-3",
            "p-1004",
            "Verification pending external confirmation",
            AlertSeverity::Low,
            "DEA",
            12,
            "DEA lookup has not returned a confirmation yet.",
            "Wait for the next connector sync or ping the DEA connector.",
            AlertStatus::Open,
        ),
        alert(
            "a-4",
            "p-1002",
            "Practice location updated",
            AlertSeverity::Info,
            "NPPES",
            240,
            "NPPES reports a new practice address matching the roster update.",
            "No action required.",
            AlertStatus::Acknowledged,
        ),
        alert(
            "a-5",
            "p-1001",
            "Possible sanctions name match",
            AlertSeverity::High,
            "OIG/LEIE",
            95,
            "A partial name match was found in the exclusion list; NPI differs.",
            "Review the exclusion record and document the disposition.",
            AlertStatus::Open,
        ),
    ]
}

// ── Connectors ────────────────────────────────────────────────────────────────

pub fn connectors(now: DateTime<Utc>) -> Vec<Connector> {
    // (id, name, description, status, minutes since check, latency, uptime)
    let rows = [
        ("c-nppes", "NPPES NPI Registry", "National Plan and Provider Enumeration System lookups.", ConnectorStatus::Healthy, 4, 240, 99.95),
        ("c-state-board", "State Medical Boards", "License status across participating state boards.", ConnectorStatus::Degraded, 9, 880, 97.40),
        ("c-oig-leie", "OIG/LEIE Exclusions", "HHS-OIG List of Excluded Individuals/Entities.", ConnectorStatus::Healthy, 6, 310, 99.80),
        ("c-dea", "DEA CSA Registry", "Controlled Substances Act registration status.", ConnectorStatus::Down, 17, 0, 93.10),
        ("c-caqh", "CAQH ProView", "Provider-attested credentialing profiles.", ConnectorStatus::Healthy, 2, 190, 99.99),
    ];

    rows.into_iter()
        .map(|(id, name, description, status, minutes, latency, uptime)| Connector {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            status,
            last_check_at: now - Duration::minutes(minutes),
            latency_ms: latency,
            uptime_pct: uptime,
            notes: notes_for(status).to_string(),
        })
        .collect()
}
