//! Seams the directory store is built against.
//!
//! - `Clock`: source of "now" for derived views and timestamps
//! - `ProbeRng`: randomness behind simulated connector probes
//! - `ActionJournal`: sink for applied mutations
//!
//! The composition root picks implementations; tests swap in fixed clocks
//! and scripted probes to make every operation deterministic.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

use credentia_contracts::{error::CredentiaResult, journal::StoreAction};

/// Supplies the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now: Mutex::new(now) }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Uniform randomness for connector probes.
pub trait ProbeRng: Send {
    /// A sample from `[0, 1)`.
    fn unit(&mut self) -> f64;
}

/// Adapts any `rand` generator to `ProbeRng`.
#[derive(Debug)]
pub struct RandProbe<R>(pub R);

impl RandProbe<StdRng> {
    /// Reproducible probe sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl<R: RngCore + Send> ProbeRng for RandProbe<R> {
    fn unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

/// Records every mutation the store applies.
///
/// Implementations should treat this as append-only. The store logs and
/// swallows write failures; a journal can never make a store operation fail.
pub trait ActionJournal: Send + Sync {
    fn record(&self, action: &StoreAction, at: DateTime<Utc>) -> CredentiaResult<()>;
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullJournal;

impl ActionJournal for NullJournal {
    fn record(&self, _action: &StoreAction, _at: DateTime<Utc>) -> CredentiaResult<()> {
        Ok(())
    }
}

impl<J: ActionJournal + ?Sized> ActionJournal for Arc<J> {
    fn record(&self, action: &StoreAction, at: DateTime<Utc>) -> CredentiaResult<()> {
        (**self).record(action, at)
    }
}
