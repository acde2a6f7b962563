//! # credentia-core
//!
//! The in-memory credentialing directory at the heart of Credentia.
//!
//! This crate provides:
//! - The seams (`Clock`, `ProbeRng`, `ActionJournal`) the store is built on
//! - The `ProviderDirectoryStore` with its snapshots, derived views and
//!   mutating operations
//! - The single-slot `SelectionChannel` for the selected provider
//! - Pure query and navigation helpers used by presentation layers
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use credentia_core::{ProviderDirectoryStore, traits::{RandProbe, SystemClock}};
//!
//! let store = ProviderDirectoryStore::new(seed, Arc::new(SystemClock), Box::new(RandProbe::seeded(7)));
//! store.selection().subscribe(|p| println!("selected: {:?}", p.map(|p| &p.id)));
//! store.select_provider_by_id("p-1002");
//! ```

pub mod navigation;
pub mod probe;
pub mod queries;
pub mod selection;
pub mod store;
pub mod traits;

pub use selection::{SelectionChannel, SubscriptionId};
pub use store::{DirectorySeed, ProviderDirectoryStore};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::{
        collections::VecDeque,
        sync::{
            atomic::{AtomicBool, Ordering},
            Arc, Mutex,
        },
        thread,
    };

    use chrono::{DateTime, Duration, TimeZone, Utc};

    use credentia_contracts::{
        alert::{AlertItem, AlertSeverity, AlertStatus},
        connector::{Connector, ConnectorStatus},
        error::{CredentiaError, CredentiaResult},
        journal::StoreAction,
        policy::{PolicyRule, PolicyRulePatch},
        provider::{Provider, VerificationStatus},
    };

    use super::*;
    use crate::{
        navigation::{route_for_npi, NpiRoute, ProfileTab},
        probe::{ProbeRoll, LATENCY_FLOOR_MS},
        queries::{filter_alerts, filter_providers, neighbours, provider_display_name, status_counts},
        traits::{ActionJournal, FixedClock, ProbeRng, RandProbe},
    };

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()
    }

    /// Probe source that replays fixed samples, then repeats 0.99 (healthy).
    struct Scripted(VecDeque<f64>);

    impl Scripted {
        fn new(samples: &[f64]) -> Self {
            Self(samples.iter().copied().collect())
        }
    }

    impl ProbeRng for Scripted {
        fn unit(&mut self) -> f64 {
            self.0.pop_front().unwrap_or(0.99)
        }
    }

    #[derive(Default)]
    struct RecordingJournal {
        actions: Mutex<Vec<StoreAction>>,
    }

    impl ActionJournal for RecordingJournal {
        fn record(&self, action: &StoreAction, _at: DateTime<Utc>) -> CredentiaResult<()> {
            self.actions.lock().unwrap().push(action.clone());
            Ok(())
        }
    }

    struct FailingJournal;

    impl ActionJournal for FailingJournal {
        fn record(&self, _action: &StoreAction, _at: DateTime<Utc>) -> CredentiaResult<()> {
            Err(CredentiaError::JournalWriteFailed {
                reason: "disk full".to_string(),
            })
        }
    }

    fn provider(id: &str, npi: &str, name: &str, status: VerificationStatus, risk: u8) -> Provider {
        Provider {
            id: id.to_string(),
            npi: npi.to_string(),
            full_name: name.to_string(),
            specialty: "Internal Medicine".to_string(),
            organization: "Triangle Health Partners".to_string(),
            state: "NC".to_string(),
            last_verified_at: t0() - Duration::minutes(45),
            status,
            risk_score: risk,
        }
    }

    fn alert(id: &str, minutes_ago: i64, severity: AlertSeverity) -> AlertItem {
        AlertItem {
            id: id.to_string(),
            provider_id: "p-1001".to_string(),
            title: format!("Alert {id}"),
            severity,
            source: "OIG/LEIE".to_string(),
            created_at: t0() - Duration::minutes(minutes_ago),
            details: "Potential sanctions match".to_string(),
            recommended_action: "Review match".to_string(),
            status: AlertStatus::Open,
        }
    }

    fn seed() -> DirectorySeed {
        DirectorySeed {
            providers: vec![
                provider("p-1001", "1457398921", "Dr. Aisha Patel", VerificationStatus::Warning, 62),
                provider("p-1002", "1881749203", "Dr. Michael Chen", VerificationStatus::Verified, 18),
                provider("p-1003", "1093764450", "Dr. Sofia Ramirez", VerificationStatus::Failed, 91),
                provider("p-1004", "1679530212", "Dr. James Wilson", VerificationStatus::Pending, 44),
            ],
            alerts: vec![
                alert("a-1", 30, AlertSeverity::High),
                alert("a-2", 5, AlertSeverity::Low),
                alert("a-3", 120, AlertSeverity::Critical),
            ],
            connectors: vec![Connector {
                id: "c-nppes".to_string(),
                name: "NPPES NPI Registry".to_string(),
                description: "National provider registry".to_string(),
                status: ConnectorStatus::Healthy,
                last_check_at: t0() - Duration::minutes(4),
                latency_ms: 240,
                uptime_pct: 99.95,
                notes: String::new(),
            }],
            policy_rules: vec![PolicyRule {
                id: "pr-1".to_string(),
                name: "Low-risk auto-approval".to_string(),
                enabled: true,
                auto_approve: true,
                risk_max: 30,
                required_sources: Default::default(),
                if_any_fails_require_manual_review: true,
            }],
        }
    }

    fn store_with(probe: impl ProbeRng + 'static) -> (ProviderDirectoryStore, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::new(t0()));
        let store = ProviderDirectoryStore::new(seed(), clock.clone(), Box::new(probe));
        (store, clock)
    }

    fn store() -> ProviderDirectoryStore {
        store_with(Scripted::new(&[])).0
    }

    fn risk_of(store: &ProviderDirectoryStore, id: &str) -> u8 {
        store.get_provider(id).unwrap().risk_score
    }

    // ── Providers & selection ─────────────────────────────────────────────────

    #[test]
    fn test_list_providers_is_an_ordered_snapshot() {
        let store = store();
        let mut snapshot = store.list_providers();
        let ids: Vec<&str> = snapshot.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p-1001", "p-1002", "p-1003", "p-1004"]);

        // Mutating the snapshot must not reach the store.
        snapshot[0].risk_score = 0;
        snapshot.clear();
        assert_eq!(store.list_providers().len(), 4);
        assert_eq!(risk_of(&store, "p-1001"), 62);
    }

    #[test]
    fn test_seed_dedupes_ids_and_clamps_risk() {
        let mut seed = seed();
        seed.providers.push(provider("p-1001", "0", "Duplicate", VerificationStatus::Failed, 5));
        seed.providers.push(provider("p-2000", "1", "Overflow", VerificationStatus::Failed, 250));

        let store = ProviderDirectoryStore::new(seed, Arc::new(FixedClock::new(t0())), Box::new(Scripted::new(&[])));

        assert_eq!(store.list_providers().len(), 5);
        assert_eq!(store.get_provider("p-1001").unwrap().full_name, "Dr. Aisha Patel");
        assert_eq!(risk_of(&store, "p-2000"), 100);
    }

    #[test]
    fn test_initial_selection_is_first_provider() {
        let store = store();
        assert_eq!(store.selection().current_id().as_deref(), Some("p-1001"));

        let empty = ProviderDirectoryStore::new(
            DirectorySeed::default(),
            Arc::new(FixedClock::new(t0())),
            Box::new(Scripted::new(&[])),
        );
        assert!(empty.selection().current().is_none());
    }

    #[test]
    fn test_observers_see_every_publish_in_order() {
        let store = store();
        let seen: Arc<Mutex<Vec<Option<String>>>> = Arc::default();

        let sink = seen.clone();
        store
            .selection()
            .subscribe(move |p| sink.lock().unwrap().push(p.map(|p| p.id.clone())));

        store.select_provider_by_id("p-1003");
        store.select_provider_by_id("p-nope");
        store.select_provider_by_id("p-1002");

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                Some("p-1001".to_string()), // retained value delivered on subscribe
                Some("p-1003".to_string()),
                None,
                Some("p-1002".to_string()),
            ]
        );
    }

    #[test]
    fn test_late_subscriber_gets_retained_value() {
        let store = store();
        store.select_provider_by_id("p-1004");

        let got: Arc<Mutex<Option<String>>> = Arc::default();
        let sink = got.clone();
        store
            .selection()
            .subscribe(move |p| *sink.lock().unwrap() = p.map(|p| p.id.clone()));

        assert_eq!(got.lock().unwrap().as_deref(), Some("p-1004"));
    }

    #[test]
    fn test_unsubscribed_observer_stops_receiving() {
        let store = store();
        let count = Arc::new(Mutex::new(0));
        let sink = count.clone();
        let id = store.selection().subscribe(move |_| *sink.lock().unwrap() += 1);

        assert!(store.selection().unsubscribe(id));
        assert!(!store.selection().unsubscribe(id));
        store.select_provider_by_id("p-1002");

        assert_eq!(*count.lock().unwrap(), 1, "only the subscribe-time delivery expected");
        assert_eq!(store.selection().observer_count(), 0);
    }

    /// Observers may read the store from inside the callback.
    #[test]
    fn test_observer_can_reenter_store() {
        let store = Arc::new(store());
        let names: Arc<Mutex<Vec<usize>>> = Arc::default();

        let (s, sink) = (Arc::downgrade(&store), names.clone());
        store.selection().subscribe(move |_| {
            if let Some(s) = s.upgrade() {
                sink.lock().unwrap().push(s.list_providers().len());
            }
        });
        store.select_provider_by_id("p-1002");

        assert_eq!(*names.lock().unwrap(), vec![4, 4]);
    }

    // ── Approve / request more info ───────────────────────────────────────────

    #[test]
    fn test_approve_failed_provider() {
        let store = store();
        let before = store.get_provider("p-1003").unwrap();
        assert_eq!(before.status, VerificationStatus::Failed);
        assert_eq!(before.risk_score, 91);

        store.mock_approve("p-1003");

        let after = store.get_provider("p-1003").unwrap();
        assert_eq!(after.status, VerificationStatus::Verified);
        assert_eq!(after.risk_score, 25);
        // Only status and risk change.
        assert_eq!(after.last_verified_at, before.last_verified_at);
    }

    #[test]
    fn test_approve_is_idempotent_and_keeps_low_risk() {
        let store = store();
        store.mock_approve("p-1003");
        let first = risk_of(&store, "p-1003");
        store.mock_approve("p-1003");
        assert_eq!(risk_of(&store, "p-1003"), first.min(25));

        store.mock_approve("p-1002");
        assert_eq!(risk_of(&store, "p-1002"), 18, "risk already under ceiling");
    }

    #[test]
    fn test_request_more_info_raises_risk_floor() {
        let store = store();
        store.mock_request_more_info("p-1002");
        let p = store.get_provider("p-1002").unwrap();
        assert_eq!(p.status, VerificationStatus::Pending);
        assert_eq!(p.risk_score, 40);

        store.mock_request_more_info("p-1003");
        assert_eq!(risk_of(&store, "p-1003"), 91);
    }

    #[test]
    fn test_mutating_selected_provider_republishes() {
        let store = store();
        store.select_provider_by_id("p-1003");

        let seen: Arc<Mutex<Vec<(VerificationStatus, u8)>>> = Arc::default();
        let sink = seen.clone();
        store.selection().subscribe(move |p| {
            if let Some(p) = p {
                sink.lock().unwrap().push((p.status, p.risk_score));
            }
        });

        store.mock_approve("p-1003");
        store.mock_request_more_info("p-1003");
        // Not selected: no publish.
        store.mock_approve("p-1001");

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                (VerificationStatus::Failed, 91),
                (VerificationStatus::Verified, 25),
                (VerificationStatus::Pending, 40),
            ]
        );
        assert_eq!(store.selection().current().unwrap().risk_score, 40);
    }

    #[test]
    fn test_republish_only_replaces_matching_selection() {
        let channel = SelectionChannel::new(Some(provider(
            "p-1003",
            "1093764450",
            "Dr. Sofia Ramirez",
            VerificationStatus::Failed,
            91,
        )));
        let delivered: Arc<Mutex<Vec<String>>> = Arc::default();
        let sink = delivered.clone();
        channel.subscribe(move |p| {
            sink.lock().unwrap().push(p.map(|p| p.id.clone()).unwrap_or_default());
        });

        let other = provider("p-1002", "1881749203", "Dr. Michael Chen", VerificationStatus::Verified, 18);
        assert!(!channel.republish_if_selected(&other));
        assert_eq!(channel.current_id().as_deref(), Some("p-1003"));

        let approved = provider("p-1003", "1093764450", "Dr. Sofia Ramirez", VerificationStatus::Verified, 25);
        assert!(channel.republish_if_selected(&approved));
        assert_eq!(channel.current().unwrap().risk_score, 25);
        assert_eq!(*delivered.lock().unwrap(), vec!["p-1003", "p-1003"]);

        let empty = SelectionChannel::new(None);
        assert!(!empty.republish_if_selected(&approved));
        assert!(empty.current().is_none());
    }

    /// Mutating a provider that was selected a moment ago must never take
    /// the selection back from a newer pick.
    #[test]
    fn test_concurrent_mutations_never_override_newer_selection() {
        let store = Arc::new(store());
        let stop = Arc::new(AtomicBool::new(false));

        let mutator = {
            let (store, stop) = (store.clone(), stop.clone());
            thread::spawn(move || {
                while !stop.load(Ordering::Relaxed) {
                    store.mock_approve("p-1003");
                    store.mock_request_more_info("p-1003");
                }
            })
        };

        let mut overridden = 0;
        for _ in 0..5_000 {
            store.select_provider_by_id("p-1003");
            store.select_provider_by_id("p-1002");
            if store.selection().current_id().as_deref() != Some("p-1002") {
                overridden += 1;
            }
        }

        stop.store(true, Ordering::Relaxed);
        mutator.join().unwrap();
        assert_eq!(overridden, 0);
    }

    /// Whatever interleaving concurrent publishers produce, the last value an
    /// observer saw is the value the channel retained.
    #[test]
    fn test_concurrent_publishes_reach_observers_in_retained_order() {
        for _ in 0..50 {
            let channel = Arc::new(SelectionChannel::new(None));
            let last_seen: Arc<Mutex<Option<String>>> = Arc::default();
            let sink = last_seen.clone();
            channel.subscribe(move |p| *sink.lock().unwrap() = p.map(|p| p.id.clone()));

            let publishers: Vec<_> = ["p-1001", "p-1002", "p-1003", "p-1004"]
                .into_iter()
                .map(|id| {
                    let channel = channel.clone();
                    let p = provider(id, "1457398921", "Dr. Aisha Patel", VerificationStatus::Pending, 44);
                    thread::spawn(move || {
                        for _ in 0..200 {
                            channel.publish(Some(p.clone()));
                        }
                    })
                })
                .collect();
            for publisher in publishers {
                publisher.join().unwrap();
            }

            assert_eq!(*last_seen.lock().unwrap(), channel.current_id());
        }
    }

    #[test]
    fn test_unknown_provider_mutations_are_noops() {
        let store = store();
        let before = store.list_providers();
        store.mock_approve("p-404");
        store.mock_request_more_info("p-404");
        assert_eq!(store.list_providers(), before);
    }

    // ── Derived views ─────────────────────────────────────────────────────────

    #[test]
    fn test_views_follow_the_injected_clock() {
        let (store, clock) = store_with(Scripted::new(&[]));

        let ledger = store.get_ledger("p-1001");
        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger[0].timestamp, t0() - Duration::minutes(18));

        clock.advance(Duration::minutes(10));
        let later = store.get_ledger("p-1001");
        assert_eq!(later[0].timestamp, t0() - Duration::minutes(8));
    }

    #[test]
    fn test_evidence_length_matches_sources() {
        let store = store();
        for id in ["p-1001", "p-1003", "p-unknown"] {
            let checks = store.get_verification_checks(id);
            let ledger = store.get_ledger(id);
            let evidence = store.get_evidence_for_provider(id);
            assert_eq!(evidence.len(), checks.len() + ledger.len() + 1);
            assert!(evidence.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
        }

        let bundle = store.compile_evidence_bundle("p-1003");
        assert_eq!(bundle.compiled_at, t0());
        assert_eq!(bundle.items, store.get_evidence_for_provider("p-1003"));
    }

    // ── Alerts ────────────────────────────────────────────────────────────────

    #[test]
    fn test_alerts_listed_newest_first() {
        let ids: Vec<String> = store().list_alerts().into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["a-2", "a-1", "a-3"]);
    }

    #[test]
    fn test_set_alert_status() {
        let store = store();
        store.set_alert_status("a-1", AlertStatus::Resolved);

        let alerts = store.list_alerts();
        let a1 = alerts.iter().find(|a| a.id == "a-1").unwrap();
        assert_eq!(a1.status, AlertStatus::Resolved);
        assert!(alerts.iter().filter(|a| a.id != "a-1").all(|a| a.status == AlertStatus::Open));
    }

    #[test]
    fn test_unknown_alert_leaves_collection_unchanged() {
        let store = store();
        let before = store.list_alerts();
        store.set_alert_status("a-404", AlertStatus::Acknowledged);
        assert_eq!(store.list_alerts(), before);
    }

    // ── Connectors ────────────────────────────────────────────────────────────

    #[test]
    fn test_ping_down_zeroes_latency() {
        // degraded roll, down roll, jitter
        let (store, _) = store_with(Scripted::new(&[0.1, 0.05, 0.5]));
        store.mock_ping_connector("c-nppes");

        let c = &store.list_connectors()[0];
        assert_eq!(c.status, ConnectorStatus::Down);
        assert_eq!(c.latency_ms, 0);
        assert_eq!(c.last_check_at, t0());
        assert!(c.notes.contains("unreachable"));
    }

    #[test]
    fn test_ping_degraded_applies_jitter() {
        let (store, _) = store_with(Scripted::new(&[0.1, 0.5, 0.25]));
        store.mock_ping_connector("c-nppes");

        let c = &store.list_connectors()[0];
        assert_eq!(c.status, ConnectorStatus::Degraded);
        // 240 - 120 + floor(0.25 * 400)
        assert_eq!(c.latency_ms, 220);
    }

    #[test]
    fn test_ping_after_down_recovers_at_latency_floor() {
        let (store, _) = store_with(Scripted::new(&[0.9, 0.01, 0.0, 0.9, 0.9, 0.1]));
        store.mock_ping_connector("c-nppes");
        store.mock_ping_connector("c-nppes");

        let c = &store.list_connectors()[0];
        assert_eq!(c.status, ConnectorStatus::Healthy);
        assert_eq!(c.latency_ms, LATENCY_FLOOR_MS);
    }

    #[test]
    fn test_ping_properties_hold_under_random_probes() {
        let (store, clock) = store_with(RandProbe::seeded(42));
        let mut last = store.list_connectors()[0].last_check_at;

        for _ in 0..500 {
            clock.advance(Duration::seconds(7));
            store.mock_ping_connector("c-nppes");
            let c = store.list_connectors().remove(0);

            assert!(c.last_check_at >= last);
            if c.status == ConnectorStatus::Down {
                assert_eq!(c.latency_ms, 0);
            } else {
                assert!(c.latency_ms >= LATENCY_FLOOR_MS);
            }
            last = c.last_check_at;
        }
    }

    #[test]
    fn test_ping_never_moves_check_time_backwards() {
        let (store, clock) = store_with(Scripted::new(&[]));
        clock.set(t0() - Duration::hours(1));
        store.mock_ping_connector("c-nppes");
        assert_eq!(store.list_connectors()[0].last_check_at, t0() - Duration::minutes(4));
    }

    #[test]
    fn test_ping_unknown_connector_is_noop() {
        let store = store();
        let before = store.list_connectors();
        store.mock_ping_connector("c-404");
        assert_eq!(store.list_connectors(), before);
    }

    // ── Policy rules ──────────────────────────────────────────────────────────

    #[test]
    fn test_update_policy_rule_merges_patch() {
        let store = store();
        store.update_policy_rule(PolicyRulePatch {
            auto_approve: Some(false),
            risk_max: Some(55),
            ..PolicyRulePatch::for_rule("pr-1")
        });

        let rule = &store.list_policy_rules()[0];
        assert!(!rule.auto_approve);
        assert_eq!(rule.risk_max, 55);
        assert!(rule.enabled, "untouched field must survive");
    }

    #[test]
    fn test_update_unknown_rule_is_noop() {
        let store = store();
        let before = store.list_policy_rules();
        store.update_policy_rule(PolicyRulePatch {
            enabled: Some(false),
            ..PolicyRulePatch::for_rule("pr-404")
        });
        assert_eq!(store.list_policy_rules(), before);
    }

    // ── Journal ───────────────────────────────────────────────────────────────

    #[test]
    fn test_only_applied_mutations_are_journaled() {
        let journal = Arc::new(RecordingJournal::default());
        let store = ProviderDirectoryStore::new(
            seed(),
            Arc::new(FixedClock::new(t0())),
            Box::new(Scripted::new(&[])),
        )
        .with_journal(Box::new(journal.clone()));

        store.mock_approve("p-1003");
        store.mock_approve("p-404");
        store.set_alert_status("a-2", AlertStatus::Acknowledged);
        store.set_alert_status("a-404", AlertStatus::Resolved);
        store.mock_ping_connector("c-nppes");
        store.update_policy_rule(PolicyRulePatch::for_rule("pr-1"));
        store.select_provider_by_id("p-1002");

        let kinds: Vec<&str> = journal.actions.lock().unwrap().iter().map(|a| a.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                "provider_approved",
                "alert_status_changed",
                "connector_pinged",
                "policy_rule_updated"
            ]
        );

        match &journal.actions.lock().unwrap()[0] {
            StoreAction::ProviderApproved { risk_before, risk_after, .. } => {
                assert_eq!((*risk_before, *risk_after), (91, 25));
            }
            other => panic!("expected ProviderApproved, got {other:?}"),
        };
    }

    #[test]
    fn test_journal_failure_does_not_fail_operation() {
        let store = ProviderDirectoryStore::new(
            seed(),
            Arc::new(FixedClock::new(t0())),
            Box::new(Scripted::new(&[])),
        )
        .with_journal(Box::new(FailingJournal));

        store.mock_approve("p-1001");
        assert_eq!(store.get_provider("p-1001").unwrap().status, VerificationStatus::Verified);
    }

    // ── Queries & navigation ──────────────────────────────────────────────────

    #[test]
    fn test_filter_providers() {
        let providers = store().list_providers();
        assert_eq!(filter_providers(&providers, "   ").len(), 4);
        assert_eq!(filter_providers(&providers, "CHEN")[0].id, "p-1002");
        assert_eq!(filter_providers(&providers, "1093764")[0].id, "p-1003");
        assert_eq!(filter_providers(&providers, "nc").len(), 4, "all share the NC seed state");
        assert!(filter_providers(&providers, "dermatology").is_empty());
    }

    #[test]
    fn test_filter_alerts_matches_enum_names() {
        let alerts = store().list_alerts();
        let critical = filter_alerts(&alerts, "critical");
        assert_eq!(critical.len(), 1);
        assert_eq!(critical[0].id, "a-3");
        assert_eq!(filter_alerts(&alerts, "sanctions").len(), 3);
    }

    #[test]
    fn test_status_counts() {
        let store = store();
        store.mock_approve("p-1003");
        let counts = status_counts(&store.list_providers());
        assert_eq!(counts.total, 4);
        assert_eq!(counts.verified, 2);
        assert_eq!(counts.warning, 1);
        assert_eq!(counts.failed, 0);
        assert_eq!(counts.pending, 1);

        assert_eq!(
            serde_json::to_value(counts).unwrap(),
            serde_json::json!({ "total": 4, "verified": 2, "warning": 1, "failed": 0, "pending": 1 })
        );
    }

    #[test]
    fn test_neighbours_and_display_name() {
        let providers = store().list_providers();

        let (prev, next) = neighbours(&providers, "p-1001");
        assert!(prev.is_none());
        assert_eq!(next.unwrap().id, "p-1002");

        let (prev, next) = neighbours(&providers, "p-1004");
        assert_eq!(prev.unwrap().id, "p-1003");
        assert!(next.is_none());

        assert_eq!(neighbours(&providers, "p-404"), (None, None));

        assert_eq!(provider_display_name(&providers, "p-1002"), "Dr. Michael Chen");
        assert_eq!(provider_display_name(&providers, "p-404"), "p-404");
    }

    #[test]
    fn test_profile_tab_parsing() {
        assert_eq!(ProfileTab::parse(None), ProfileTab::Overview);
        assert_eq!(ProfileTab::parse(Some("LEDGER")), ProfileTab::Ledger);
        assert_eq!(ProfileTab::parse(Some("billing")), ProfileTab::Overview);
        // Only case is normalized; padded values fall back.
        assert_eq!(ProfileTab::parse(Some(" checks")), ProfileTab::Overview);

        for tab in ProfileTab::ALL {
            assert_eq!(ProfileTab::from_index(tab.index()), tab);
        }
        assert_eq!(ProfileTab::from_index(9), ProfileTab::Evidence);
    }

    #[test]
    fn test_npi_routes() {
        let providers = store().list_providers();
        assert_eq!(
            route_for_npi(&providers, " 1881749203 "),
            NpiRoute::Profile {
                provider_id: "p-1002".to_string(),
                tab: ProfileTab::Overview,
            }
        );
        assert_eq!(route_for_npi(&providers, "0000000000"), NpiRoute::Root);
    }

    // ── Probe resolution ──────────────────────────────────────────────────────

    #[test]
    fn test_down_wins_over_degraded() {
        let roll = ProbeRoll { degraded: 0.0, down: 0.0, jitter: 0.9 };
        let outcome = probe::resolve(500, roll);
        assert_eq!(outcome.status, ConnectorStatus::Down);
        assert_eq!(outcome.latency_ms, 0);
    }

    #[test]
    fn test_latency_jitter_bounds() {
        let low = probe::resolve(1000, ProbeRoll { degraded: 0.9, down: 0.9, jitter: 0.0 });
        let high = probe::resolve(1000, ProbeRoll { degraded: 0.9, down: 0.9, jitter: 0.999_999 });
        assert_eq!(low.latency_ms, 880);
        assert_eq!(high.latency_ms, 880 + 399);
        assert_eq!(low.status, ConnectorStatus::Healthy);
    }
}
