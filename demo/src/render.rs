//! Plain-text rendering of directory snapshots for the console.

use chrono::{DateTime, Utc};

use credentia_audit::JournalExport;
use credentia_contracts::{
    alert::AlertItem,
    connector::Connector,
    policy::PolicyRule,
    provider::Provider,
    verification::{EvidenceItem, LedgerEntry, VerificationCheck},
};
use credentia_core::queries::{provider_display_name, StatusCounts};

fn ts(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn heading(title: &str) {
    println!();
    println!("{}", title);
    println!("{}", "─".repeat(title.chars().count()));
}

pub fn providers(providers: &[Provider]) {
    heading("Providers");
    if providers.is_empty() {
        println!("  (no providers match)");
        return;
    }
    for p in providers {
        println!(
            "  {:<7} {:<16} {:<20} {:<18} risk {:>3}  {}  verified {}",
            p.id,
            p.status.label(),
            p.full_name,
            p.specialty,
            p.risk_score,
            p.npi,
            ts(&p.last_verified_at)
        );
    }
}

pub fn provider(p: &Provider) {
    println!(
        "  {} — {} ({}, {}, {})",
        p.id, p.full_name, p.specialty, p.organization, p.state
    );
    println!(
        "    npi {}  status {}  risk {}  last verified {}",
        p.npi,
        p.status.label(),
        p.risk_score,
        ts(&p.last_verified_at)
    );
}

pub fn kpis(counts: &StatusCounts) {
    heading("Queue");
    println!(
        "  total {}  verified {}  needs attention {}  failed {}  pending {}",
        counts.total, counts.verified, counts.warning, counts.failed, counts.pending
    );
}

pub fn checks(provider_id: &str, checks: &[VerificationCheck]) {
    heading(&format!("Verification checks · {}", provider_id));
    for c in checks {
        println!(
            "  [{:<8}] {:<20} {:<20} {}  {}",
            c.status.as_str(),
            c.name,
            c.source,
            ts(&c.checked_at),
            c.details
        );
    }
}

pub fn ledger(provider_id: &str, entries: &[LedgerEntry]) {
    heading(&format!("Ledger · {}", provider_id));
    for e in entries {
        println!(
            "  {}  {:<19} {:<24} {}  {}",
            ts(&e.timestamp),
            e.action,
            e.actor,
            e.tx_hash,
            e.summary
        );
    }
}

pub fn evidence(provider_id: &str, items: &[EvidenceItem]) {
    heading(&format!("Evidence bundle · {}", provider_id));
    for i in items {
        println!(
            "  {}  {:<10} [{:<8}] {:<26} {}",
            ts(&i.timestamp),
            i.category.as_str(),
            i.status.as_str(),
            i.title,
            i.summary
        );
    }
}

pub fn alerts(alerts: &[AlertItem], providers: &[Provider]) {
    heading("Alerts");
    if alerts.is_empty() {
        println!("  (no alerts match)");
        return;
    }
    for a in alerts {
        println!(
            "  {:<4} {:<8} {:<12} {}  {} · {}",
            a.id,
            a.severity.as_str(),
            a.status.as_str(),
            ts(&a.created_at),
            a.title,
            provider_display_name(providers, &a.provider_id)
        );
        println!("       {}", a.details);
        println!("       → {}", a.recommended_action);
    }
}

pub fn connectors(connectors: &[Connector]) {
    heading("Connectors");
    for c in connectors {
        println!(
            "  {:<14} {:<9} {:>5} ms  uptime {:>6.2}%  checked {}  {}",
            c.id,
            c.status.as_str(),
            c.latency_ms,
            c.uptime_pct,
            ts(&c.last_check_at),
            c.notes
        );
    }
}

pub fn policy_rules(rules: &[PolicyRule]) {
    heading("Policy rules");
    for r in rules {
        let sources: Vec<&str> = r.required_sources.iter().map(String::as_str).collect();
        println!(
            "  {:<5} {:<34} enabled {:<5} auto-approve {:<5} risk ≤ {:>3}  manual review on fail {:<5}  sources [{}]",
            r.id,
            r.name,
            r.enabled,
            r.auto_approve,
            r.risk_max,
            r.if_any_fails_require_manual_review,
            sources.join(", ")
        );
    }
}

pub fn journal(export: &JournalExport, intact: bool) {
    heading(&format!("Action journal · {}", export.journal_id));
    for e in &export.entries {
        println!(
            "  #{:<3} {}  {:<22} {:<14} {}…",
            e.sequence,
            ts(&e.recorded_at),
            e.action.kind(),
            e.action.subject_id(),
            e.this_hash.get(..12).unwrap_or(e.this_hash.as_str())
        );
    }
    println!(
        "  {} entries · chain {}",
        export.entries.len(),
        if intact { "intact" } else { "BROKEN" }
    );
}
