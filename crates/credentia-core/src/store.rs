//! The in-memory provider directory.
//!
//! `ProviderDirectoryStore` owns every credentialing collection (providers,
//! alerts, connectors, policy rules), serves snapshots and derived views,
//! and applies the mutating operations.
//!
//! Contract: no operation fails. An unknown id makes a mutator a silent
//! no-op, a view builder return its base output, and a selection publish
//! `None`. Only mutations that actually found their target are journaled.
//!
//! All collections sit behind one `Mutex`, so each mutator's
//! read-modify-write is serialized. Selection observers and the journal are
//! invoked after that lock is released.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use credentia_contracts::{
    alert::{AlertItem, AlertStatus},
    connector::Connector,
    journal::StoreAction,
    policy::{PolicyRule, PolicyRulePatch},
    provider::{Provider, VerificationStatus, MAX_RISK_SCORE},
    verification::{EvidenceBundle, EvidenceItem, LedgerEntry, VerificationCheck},
};
use credentia_evidence::{compile_bundle, evidence_for_provider, ledger_entries, verification_checks};
use credentia_policy::apply_patch;

use crate::{
    probe::{self, ProbeRoll},
    selection::SelectionChannel,
    traits::{ActionJournal, Clock, NullJournal, ProbeRng},
};

/// Risk ceiling applied by `mock_approve`.
pub const APPROVED_RISK_CEILING: u8 = 25;
/// Risk floor applied by `mock_request_more_info`.
pub const MORE_INFO_RISK_FLOOR: u8 = 40;

/// Initial contents of a directory.
#[derive(Debug, Clone, Default)]
pub struct DirectorySeed {
    pub providers: Vec<Provider>,
    pub alerts: Vec<AlertItem>,
    pub connectors: Vec<Connector>,
    pub policy_rules: Vec<PolicyRule>,
}

struct DirectoryState {
    providers: Vec<Provider>,
    alerts: Vec<AlertItem>,
    connectors: Vec<Connector>,
    policy_rules: Vec<PolicyRule>,
}

impl DirectoryState {
    /// Enforce the provider invariants on seed data: unique ids (first
    /// occurrence wins) and risk scores inside 0–100.
    fn from_seed(seed: DirectorySeed) -> Self {
        let mut providers: Vec<Provider> = Vec::with_capacity(seed.providers.len());
        for mut provider in seed.providers {
            if providers.iter().any(|p| p.id == provider.id) {
                warn!(provider_id = %provider.id, "duplicate provider id in seed; keeping first");
                continue;
            }
            provider.risk_score = provider.risk_score.min(MAX_RISK_SCORE);
            providers.push(provider);
        }

        Self {
            providers,
            alerts: seed.alerts,
            connectors: seed.connectors,
            policy_rules: seed.policy_rules,
        }
    }
}

/// In-memory credentialing directory.
///
/// Construct one per process at the composition root and hand out
/// references (or an `Arc`) to consumers.
///
/// ```rust,ignore
/// let store = ProviderDirectoryStore::new(seed, Arc::new(SystemClock), Box::new(RandProbe::from_entropy()))
///     .with_journal(Box::new(journal));
/// store.mock_approve("p-1003");
/// ```
pub struct ProviderDirectoryStore {
    state: Mutex<DirectoryState>,
    selection: SelectionChannel,
    clock: Arc<dyn Clock>,
    probe: Mutex<Box<dyn ProbeRng>>,
    journal: Box<dyn ActionJournal>,
}

impl ProviderDirectoryStore {
    /// Build a store from `seed`. The first seeded provider becomes the
    /// initial selection.
    pub fn new(seed: DirectorySeed, clock: Arc<dyn Clock>, probe: Box<dyn ProbeRng>) -> Self {
        let state = DirectoryState::from_seed(seed);
        let initial = state.providers.first().cloned();

        info!(
            providers = state.providers.len(),
            alerts = state.alerts.len(),
            connectors = state.connectors.len(),
            policy_rules = state.policy_rules.len(),
            "provider directory seeded"
        );

        Self {
            state: Mutex::new(state),
            selection: SelectionChannel::new(initial),
            clock,
            probe: Mutex::new(probe),
            journal: Box::new(NullJournal),
        }
    }

    /// Replace the journal that receives applied mutations.
    pub fn with_journal(mut self, journal: Box<dyn ActionJournal>) -> Self {
        self.journal = journal;
        self
    }

    fn state(&self) -> MutexGuard<'_, DirectoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn journal(&self, action: StoreAction, at: DateTime<Utc>) {
        if let Err(e) = self.journal.record(&action, at) {
            warn!(
                kind = action.kind(),
                subject_id = %action.subject_id(),
                error = %e,
                "failed to journal store action"
            );
        }
    }

    // ── Providers ─────────────────────────────────────────────────────────────

    /// Snapshot of all providers in insertion order.
    pub fn list_providers(&self) -> Vec<Provider> {
        self.state().providers.clone()
    }

    pub fn get_provider(&self, id: &str) -> Option<Provider> {
        self.state().providers.iter().find(|p| p.id == id).cloned()
    }

    /// The selected-provider channel. Subscribe here to follow selection.
    pub fn selection(&self) -> &SelectionChannel {
        &self.selection
    }

    /// Publish the provider with `id`, or `None` when no provider matches.
    pub fn select_provider_by_id(&self, id: &str) {
        let found = self.get_provider(id);
        if found.is_none() {
            debug!(provider_id = %id, "selecting unknown provider; publishing none");
        }
        self.selection.publish(found);
    }

    /// Apply `update` to the provider with `id`, returning (before, after).
    fn replace_provider<F>(&self, id: &str, update: F) -> Option<(Provider, Provider)>
    where
        F: FnOnce(&Provider) -> Provider,
    {
        let mut state = self.state();
        let slot = state.providers.iter_mut().find(|p| p.id == id)?;
        let before = slot.clone();
        *slot = update(&before);
        Some((before, slot.clone()))
    }

    /// Mark the provider verified and cap its risk at 25.
    pub fn mock_approve(&self, provider_id: &str) {
        let Some((before, after)) = self.replace_provider(provider_id, |p| Provider {
            status: VerificationStatus::Verified,
            risk_score: p.risk_score.min(APPROVED_RISK_CEILING),
            ..p.clone()
        }) else {
            debug!(provider_id = %provider_id, "approve ignored: unknown provider");
            return;
        };

        info!(
            provider_id = %provider_id,
            previous_status = %before.status,
            risk_before = before.risk_score,
            risk_after = after.risk_score,
            "provider approved"
        );

        self.selection.republish_if_selected(&after);
        self.journal(
            StoreAction::ProviderApproved {
                provider_id: provider_id.to_string(),
                previous_status: before.status,
                risk_before: before.risk_score,
                risk_after: after.risk_score,
            },
            self.now(),
        );
    }

    /// Move the provider back to pending and raise its risk to at least 40.
    pub fn mock_request_more_info(&self, provider_id: &str) {
        let Some((before, after)) = self.replace_provider(provider_id, |p| Provider {
            status: VerificationStatus::Pending,
            risk_score: p.risk_score.max(MORE_INFO_RISK_FLOOR).min(MAX_RISK_SCORE),
            ..p.clone()
        }) else {
            debug!(provider_id = %provider_id, "request-more-info ignored: unknown provider");
            return;
        };

        info!(
            provider_id = %provider_id,
            previous_status = %before.status,
            risk_before = before.risk_score,
            risk_after = after.risk_score,
            "more information requested"
        );

        self.selection.republish_if_selected(&after);
        self.journal(
            StoreAction::MoreInfoRequested {
                provider_id: provider_id.to_string(),
                previous_status: before.status,
                risk_before: before.risk_score,
                risk_after: after.risk_score,
            },
            self.now(),
        );
    }

    // ── Derived views ─────────────────────────────────────────────────────────

    pub fn get_verification_checks(&self, provider_id: &str) -> Vec<VerificationCheck> {
        verification_checks(provider_id, self.now())
    }

    /// Three ledger entries, regenerated against the current time.
    pub fn get_ledger(&self, provider_id: &str) -> Vec<LedgerEntry> {
        ledger_entries(provider_id, self.now())
    }

    /// Checks and ledger merged into one timeline, newest first.
    pub fn get_evidence_for_provider(&self, provider_id: &str) -> Vec<EvidenceItem> {
        evidence_for_provider(provider_id, self.now())
    }

    pub fn compile_evidence_bundle(&self, provider_id: &str) -> EvidenceBundle {
        compile_bundle(provider_id, self.now())
    }

    // ── Alerts ────────────────────────────────────────────────────────────────

    /// Snapshot of alerts, newest `created_at` first.
    pub fn list_alerts(&self) -> Vec<AlertItem> {
        let mut alerts = self.state().alerts.clone();
        alerts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        alerts
    }

    pub fn set_alert_status(&self, id: &str, status: AlertStatus) {
        let previous = {
            let mut state = self.state();
            let Some(alert) = state.alerts.iter_mut().find(|a| a.id == id) else {
                debug!(alert_id = %id, "alert status change ignored: unknown alert");
                return;
            };
            std::mem::replace(&mut alert.status, status)
        };

        info!(alert_id = %id, from = %previous, to = %status, "alert status changed");
        self.journal(
            StoreAction::AlertStatusChanged {
                alert_id: id.to_string(),
                from: previous,
                to: status,
            },
            self.now(),
        );
    }

    // ── Connectors ────────────────────────────────────────────────────────────

    /// Snapshot of connectors in insertion order.
    pub fn list_connectors(&self) -> Vec<Connector> {
        self.state().connectors.clone()
    }

    /// Simulate a health probe against connector `id`.
    pub fn mock_ping_connector(&self, id: &str) {
        let now = self.now();
        let outcome = {
            let mut state = self.state();
            let Some(connector) = state.connectors.iter_mut().find(|c| c.id == id) else {
                debug!(connector_id = %id, "ping ignored: unknown connector");
                return;
            };

            let roll = {
                let mut rng = self.probe.lock().unwrap_or_else(PoisonError::into_inner);
                ProbeRoll::draw(rng.as_mut())
            };
            let outcome = probe::resolve(connector.latency_ms, roll);

            connector.status = outcome.status;
            connector.latency_ms = outcome.latency_ms;
            connector.notes = outcome.notes.to_string();
            // Check time never moves backwards.
            connector.last_check_at = connector.last_check_at.max(now);
            outcome
        };

        info!(
            connector_id = %id,
            status = %outcome.status,
            latency_ms = outcome.latency_ms,
            "connector pinged"
        );
        self.journal(
            StoreAction::ConnectorPinged {
                connector_id: id.to_string(),
                status: outcome.status,
                latency_ms: outcome.latency_ms,
            },
            now,
        );
    }

    // ── Policy rules ──────────────────────────────────────────────────────────

    pub fn list_policy_rules(&self) -> Vec<PolicyRule> {
        self.state().policy_rules.clone()
    }

    /// Merge `patch` into the rule whose id matches `patch.id`.
    pub fn update_policy_rule(&self, patch: PolicyRulePatch) {
        {
            let mut state = self.state();
            let Some(rule) = state.policy_rules.iter_mut().find(|r| r.id == patch.id) else {
                debug!(rule_id = %patch.id, "policy update ignored: unknown rule");
                return;
            };
            *rule = apply_patch(rule, &patch);
        }

        info!(rule_id = %patch.id, "policy rule updated");
        self.journal(StoreAction::PolicyRuleUpdated { patch }, self.now());
    }
}

impl std::fmt::Debug for ProviderDirectoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state();
        f.debug_struct("ProviderDirectoryStore")
            .field("providers", &state.providers.len())
            .field("alerts", &state.alerts.len())
            .field("connectors", &state.connectors.len())
            .field("policy_rules", &state.policy_rules.len())
            .field("selection", &self.selection)
            .finish()
    }
}
