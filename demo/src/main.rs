//! Credentia: Provider Credentialing Directory CLI
//!
//! Builds the in-memory directory from the bundled fixtures and runs one
//! operation against it. State lives for a single invocation; use
//! `walkthrough` to see a sequence of mutations against the same store.
//!
//! Usage:
//!   cargo run -p credentia-demo -- providers --query pediatrics
//!   cargo run -p credentia-demo -- approve p-1003 --journal
//!   cargo run -p credentia-demo -- --seed 7 ping c-nppes --times 3
//!   cargo run -p credentia-demo -- walkthrough

mod render;

use std::{path::PathBuf, sync::Arc};

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use credentia_audit::InMemoryJournal;
use credentia_contracts::{
    alert::AlertStatus,
    error::{CredentiaError, CredentiaResult},
    policy::PolicyRulePatch,
    provider::Provider,
};
use credentia_core::{
    navigation::{route_for_npi, NpiRoute, ProfileTab},
    queries::{filter_alerts, filter_providers, neighbours, status_counts},
    traits::{Clock, RandProbe, SystemClock},
    ProviderDirectoryStore,
};
use credentia_fixtures::{default_policy_book, directory_seed_with_policy};
use credentia_policy::{parse_risk_max, PolicyBook};

// ── CLI definition ────────────────────────────────────────────────────────────

/// Credentia provider credentialing directory console.
///
/// Every subcommand runs against a freshly seeded in-memory directory.
#[derive(Parser)]
#[command(
    name = "credentia",
    about = "Credentia provider credentialing directory",
    long_about = "Browse providers, verification checks, evidence, alerts, connectors and\n\
                  policy rules from a fictional credentialing directory, and apply the\n\
                  mock approve / request-info / ping / policy operations."
)]
struct Cli {
    /// Policy rule book to load instead of the bundled one.
    #[arg(long, global = true, value_name = "PATH")]
    policy: Option<PathBuf>,

    /// Seed for connector probes. Random when omitted.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Print the action journal and its integrity after the command.
    #[arg(long, global = true)]
    journal: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List providers, optionally filtered.
    Providers {
        #[arg(long, default_value = "")]
        query: String,
    },
    /// Queue counts by verification status.
    Kpis,
    /// Select a provider and show what the selection channel delivers.
    Select { id: String },
    /// Show one provider profile tab with prev/next navigation.
    Profile {
        id: String,
        #[arg(long)]
        tab: Option<String>,
    },
    /// Verification checks for a provider.
    Checks { id: String },
    /// Ledger entries for a provider.
    Ledger { id: String },
    /// Compiled evidence bundle for a provider.
    Evidence { id: String },
    /// List alerts, newest first, optionally filtered.
    Alerts {
        #[arg(long, default_value = "")]
        query: String,
    },
    /// Set an alert's status (open, acknowledged, resolved).
    AlertStatus { id: String, status: String },
    /// List source connectors.
    Connectors,
    /// Probe a connector.
    Ping {
        id: String,
        #[arg(long, default_value_t = 1)]
        times: u32,
    },
    /// List policy rules.
    Policy {
        /// Print the rule book as TOML.
        #[arg(long)]
        toml: bool,
    },
    /// Patch one policy rule.
    PolicySet {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        enabled: Option<bool>,
        #[arg(long)]
        auto_approve: Option<bool>,
        /// Numeric ceiling; floored and clamped to 0..=100. Non-numeric text is ignored.
        #[arg(long)]
        risk_max: Option<String>,
        /// Comma-separated source names.
        #[arg(long, value_delimiter = ',')]
        sources: Option<Vec<String>>,
        #[arg(long)]
        manual_review: Option<bool>,
    },
    /// Mark a provider verified.
    Approve { id: String },
    /// Send a provider back to pending for more information.
    RequestInfo { id: String },
    /// Resolve an NPI deep link to a provider profile.
    ResolveNpi {
        npi: String,
        #[arg(long)]
        tab: Option<String>,
    },
    /// Run a scripted session touching every operation.
    Walkthrough,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug for store-level tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    if !cli.json {
        print_banner();
    }

    if let Err(e) = run(cli) {
        eprintln!("credentia error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> CredentiaResult<()> {
    let console = Console::build(&cli)?;
    console.dispatch(cli.command)?;
    if cli.journal {
        console.show_journal()?;
    }
    Ok(())
}

// ── Composition ───────────────────────────────────────────────────────────────

struct Console {
    store: ProviderDirectoryStore,
    journal: Arc<InMemoryJournal>,
    json: bool,
}

impl Console {
    fn build(cli: &Cli) -> CredentiaResult<Self> {
        let clock = Arc::new(SystemClock);
        let policy = match &cli.policy {
            Some(path) => PolicyBook::from_file(path)?,
            None => default_policy_book()?,
        };
        let probe = match cli.seed {
            Some(seed) => RandProbe::seeded(seed),
            None => RandProbe::from_entropy(),
        };
        let journal = Arc::new(InMemoryJournal::new());
        let store = ProviderDirectoryStore::new(
            directory_seed_with_policy(clock.now(), policy),
            clock,
            Box::new(probe),
        )
        .with_journal(Box::new(journal.clone()));

        info!(
            journal_id = journal.journal_id(),
            seeded = cli.seed.is_some(),
            custom_policy = cli.policy.is_some(),
            "directory ready"
        );

        Ok(Self {
            store,
            journal,
            json: cli.json,
        })
    }

    /// Print `value` as JSON in `--json` mode, otherwise hand it to `human`.
    fn emit<T: Serialize>(&self, value: &T, human: impl FnOnce(&T)) -> CredentiaResult<()> {
        if self.json {
            let text = serde_json::to_string_pretty(value).map_err(|e| {
                CredentiaError::Serialization {
                    reason: e.to_string(),
                }
            })?;
            println!("{}", text);
        } else {
            human(value);
        }
        Ok(())
    }

    fn note(&self, message: &str) {
        if !self.json {
            println!("  {}", message);
        }
    }

    fn require_provider(&self, id: &str) -> Option<Provider> {
        let found = self.store.get_provider(id);
        if found.is_none() {
            self.note(&format!("no provider '{}'; nothing changed", id));
        }
        found
    }

    fn dispatch(&self, command: Command) -> CredentiaResult<()> {
        match command {
            Command::Providers { query } => self.providers(&query),
            Command::Kpis => self.kpis(),
            Command::Select { id } => self.select(&id),
            Command::Profile { id, tab } => self.profile(&id, ProfileTab::parse(tab.as_deref())),
            Command::Checks { id } => self.checks(&id),
            Command::Ledger { id } => self.ledger(&id),
            Command::Evidence { id } => self.evidence(&id),
            Command::Alerts { query } => self.alerts(&query),
            Command::AlertStatus { id, status } => self.alert_status(&id, status.parse()?),
            Command::Connectors => self.connectors(),
            Command::Ping { id, times } => self.ping(&id, times),
            Command::Policy { toml } => self.policy(toml),
            Command::PolicySet {
                id,
                name,
                enabled,
                auto_approve,
                risk_max,
                sources,
                manual_review,
            } => {
                let patch = PolicyRulePatch {
                    id,
                    name,
                    enabled,
                    auto_approve,
                    risk_max: risk_max.as_deref().and_then(parse_risk_max),
                    required_sources: sources.map(|s| {
                        s.into_iter()
                            .map(|source| source.trim().to_string())
                            .filter(|source| !source.is_empty())
                            .collect()
                    }),
                    if_any_fails_require_manual_review: manual_review,
                };
                self.policy_set(patch)
            }
            Command::Approve { id } => self.approve(&id),
            Command::RequestInfo { id } => self.request_info(&id),
            Command::ResolveNpi { npi, tab } => self.resolve_npi(&npi, tab.as_deref()),
            Command::Walkthrough => self.walkthrough(),
        }
    }

    // ── Providers ─────────────────────────────────────────────────────────────

    fn providers(&self, query: &str) -> CredentiaResult<()> {
        let matches = filter_providers(&self.store.list_providers(), query);
        self.emit(&matches, |p| render::providers(p))
    }

    fn kpis(&self) -> CredentiaResult<()> {
        let counts = status_counts(&self.store.list_providers());
        self.emit(&counts, render::kpis)
    }

    fn select(&self, id: &str) -> CredentiaResult<()> {
        let json = self.json;
        let subscription = self.store.selection().subscribe(move |selected| {
            if !json {
                match selected {
                    Some(p) => println!("  selection → {} ({})", p.full_name, p.id),
                    None => println!("  selection → none"),
                }
            }
        });
        self.store.select_provider_by_id(id);
        self.store.selection().unsubscribe(subscription);
        self.emit(&self.store.selection().current(), |_| ())
    }

    fn profile(&self, id: &str, tab: ProfileTab) -> CredentiaResult<()> {
        let providers = self.store.list_providers();
        let Some(provider) = providers.iter().find(|p| p.id == id) else {
            self.note(&format!("no provider '{}'", id));
            return Ok(());
        };
        self.store.select_provider_by_id(id);

        if !self.json {
            println!();
            println!("Profile · {} · tab {}", provider.full_name, tab);
            render::provider(provider);
            let (prev, next) = neighbours(&providers, id);
            println!(
                "    prev {}  next {}",
                prev.map_or("—", |p| p.id.as_str()),
                next.map_or("—", |p| p.id.as_str())
            );
        }

        match tab {
            ProfileTab::Overview => self.emit(provider, |_| ()),
            ProfileTab::Checks => self.checks(id),
            ProfileTab::Ledger => self.ledger(id),
            ProfileTab::Evidence => self.evidence(id),
        }
    }

    fn checks(&self, id: &str) -> CredentiaResult<()> {
        let checks = self.store.get_verification_checks(id);
        self.emit(&checks, |c| render::checks(id, c))
    }

    fn ledger(&self, id: &str) -> CredentiaResult<()> {
        let entries = self.store.get_ledger(id);
        self.emit(&entries, |e| render::ledger(id, e))
    }

    fn evidence(&self, id: &str) -> CredentiaResult<()> {
        let bundle = self.store.compile_evidence_bundle(id);
        self.emit(&bundle, |b| render::evidence(id, &b.items))
    }

    fn approve(&self, id: &str) -> CredentiaResult<()> {
        if self.require_provider(id).is_none() {
            return Ok(());
        }
        self.store.mock_approve(id);
        let after = self.store.get_provider(id);
        self.emit(&after, |p| {
            if let Some(p) = p {
                println!();
                println!("Approved");
                render::provider(p);
            }
        })
    }

    fn request_info(&self, id: &str) -> CredentiaResult<()> {
        if self.require_provider(id).is_none() {
            return Ok(());
        }
        self.store.mock_request_more_info(id);
        let after = self.store.get_provider(id);
        self.emit(&after, |p| {
            if let Some(p) = p {
                println!();
                println!("More information requested");
                render::provider(p);
            }
        })
    }

    fn resolve_npi(&self, npi: &str, tab: Option<&str>) -> CredentiaResult<()> {
        match route_for_npi(&self.store.list_providers(), npi) {
            NpiRoute::Profile { provider_id, tab: default_tab } => {
                self.note(&format!("/provider/{}?tab={}", provider_id, default_tab));
                let tab = tab.map_or(default_tab, |raw| ProfileTab::parse(Some(raw)));
                self.profile(&provider_id, tab)
            }
            NpiRoute::Root => {
                self.note(&format!("no provider with NPI '{}'; redirecting to /", npi.trim()));
                self.emit(&Option::<Provider>::None, |_| ())
            }
        }
    }

    // ── Monitoring ────────────────────────────────────────────────────────────

    fn alerts(&self, query: &str) -> CredentiaResult<()> {
        let matches = filter_alerts(&self.store.list_alerts(), query);
        let providers = self.store.list_providers();
        self.emit(&matches, |a| render::alerts(a, &providers))
    }

    fn alert_status(&self, id: &str, status: AlertStatus) -> CredentiaResult<()> {
        self.store.set_alert_status(id, status);
        let alert = self.store.list_alerts().into_iter().find(|a| a.id == id);
        if alert.is_none() {
            self.note(&format!("no alert '{}'; nothing changed", id));
        }
        let providers = self.store.list_providers();
        self.emit(&alert, |a| {
            if let Some(a) = a {
                render::alerts(std::slice::from_ref(a), &providers);
            }
        })
    }

    fn connectors(&self) -> CredentiaResult<()> {
        let connectors = self.store.list_connectors();
        self.emit(&connectors, |c| render::connectors(c))
    }

    fn ping(&self, id: &str, times: u32) -> CredentiaResult<()> {
        let mut results = Vec::new();
        for _ in 0..times {
            self.store.mock_ping_connector(id);
            match self.store.list_connectors().into_iter().find(|c| c.id == id) {
                Some(c) => results.push(c),
                None => {
                    self.note(&format!("no connector '{}'; nothing probed", id));
                    break;
                }
            }
        }
        self.emit(&results, |c| render::connectors(c))
    }

    // ── Policy ────────────────────────────────────────────────────────────────

    fn policy(&self, as_toml: bool) -> CredentiaResult<()> {
        if as_toml && self.json {
            return Err(CredentiaError::ConfigError {
                reason: "--toml and --json are mutually exclusive".to_string(),
            });
        }
        let rules = self.store.list_policy_rules();
        if as_toml {
            println!("{}", PolicyBook { rules }.to_toml_string()?);
            return Ok(());
        }
        self.emit(&rules, |r| render::policy_rules(r))
    }

    fn policy_set(&self, patch: PolicyRulePatch) -> CredentiaResult<()> {
        let id = patch.id.clone();
        if patch.is_empty() {
            self.note("no fields to change");
        }
        self.store.update_policy_rule(patch);
        let rule = self
            .store
            .list_policy_rules()
            .into_iter()
            .find(|r| r.id == id);
        if rule.is_none() {
            self.note(&format!("no policy rule '{}'; nothing changed", id));
        }
        self.emit(&rule, |r| {
            if let Some(r) = r {
                render::policy_rules(std::slice::from_ref(r));
            }
        })
    }

    // ── Journal ───────────────────────────────────────────────────────────────

    fn show_journal(&self) -> CredentiaResult<()> {
        let export = self.journal.export();
        let intact = self.journal.verify_integrity();
        if self.json {
            let value = serde_json::json!({ "intact": intact, "journal": export });
            return self.emit(&value, |_| ());
        }
        render::journal(&export, intact);
        Ok(())
    }

    // ── Walkthrough ───────────────────────────────────────────────────────────

    fn walkthrough(&self) -> CredentiaResult<()> {
        if self.json {
            return Err(CredentiaError::ConfigError {
                reason: "walkthrough prints a narrated session and has no JSON form".to_string(),
            });
        }

        step(1, "Dashboard");
        self.kpis()?;
        self.providers("")?;

        step(2, "Select the failed provider and watch the selection channel");
        let subscription = self.store.selection().subscribe(|selected| match selected {
            Some(p) => println!(
                "  selection → {} · {} · risk {}",
                p.full_name,
                p.status.label(),
                p.risk_score
            ),
            None => println!("  selection → none"),
        });
        self.store.select_provider_by_id("p-1003");
        self.checks("p-1003")?;

        step(3, "Approve p-1003 (selected, so the channel republishes)");
        self.store.mock_approve("p-1003");

        step(4, "Request more information from p-1001 (not selected)");
        self.store.mock_request_more_info("p-1001");
        if let Some(p) = self.store.get_provider("p-1001") {
            render::provider(&p);
        }
        self.store.selection().unsubscribe(subscription);

        step(5, "Evidence bundle for p-1003");
        self.ledger("p-1003")?;
        self.evidence("p-1003")?;

        step(6, "Triage alerts");
        self.store.set_alert_status("a-1", AlertStatus::Acknowledged);
        self.store.set_alert_status("a-5", AlertStatus::Resolved);
        self.alerts("")?;

        step(7, "Probe every connector");
        for connector in self.store.list_connectors() {
            self.store.mock_ping_connector(&connector.id);
        }
        self.connectors()?;

        step(8, "Tighten the auto-approve rule");
        let mut patch = PolicyRulePatch::for_rule("pr-1");
        patch.risk_max = parse_risk_max("18.7");
        patch.auto_approve = Some(false);
        self.store.update_policy_rule(patch);
        self.policy(false)?;

        step(9, "Resolve an NPI deep link");
        self.resolve_npi(" 1093764450 ", Some("evidence"))?;
        self.resolve_npi("0000000000", None)?;

        step(10, "Action journal");
        self.show_journal()
    }
}

fn step(n: u32, title: &str) {
    println!();
    println!("[{}] {}", n, title);
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("Credentia — Provider Credentialing Directory");
    println!("============================================");
    println!("Fictional data. Probes, approvals and alerts are simulated in memory.");
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("credentia").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_policy_toml_rejects_json_mode() {
        let err = run(cli(&["--json", "policy", "--toml"])).unwrap_err();
        assert!(matches!(err, CredentiaError::ConfigError { .. }));
    }

    #[test]
    fn test_policy_toml_and_json_each_work_alone() {
        assert!(run(cli(&["policy", "--toml"])).is_ok());
        assert!(run(cli(&["--json", "policy"])).is_ok());
    }

    #[test]
    fn test_kpis_json() {
        assert!(run(cli(&["--json", "--seed", "3", "kpis"])).is_ok());
    }

    #[test]
    fn test_walkthrough_has_no_json_form() {
        assert!(run(cli(&["walkthrough"])).is_ok());
        assert!(run(cli(&["--json", "walkthrough"])).is_err());
    }

    #[test]
    fn test_unknown_alert_status_is_reported() {
        let err = run(cli(&["alert-status", "a-1", "snoozed"])).unwrap_err();
        assert!(matches!(err, CredentiaError::UnknownVariant { .. }));
    }
}
