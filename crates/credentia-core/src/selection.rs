//! The "selected provider" notification channel.
//!
//! A single-slot broadcast: the most recent value is retained, every
//! observer sees every published value in publish order, and a late
//! subscriber is handed the retained value as soon as it subscribes.
//!
//! Observers run synchronously on the publishing thread, after the state
//! lock has been released, so an observer may freely read the channel or
//! the store. Delivery is serialized by a separate dispatch lock: observers
//! see values in the order `current` took them. An observer must not
//! publish or subscribe from inside its callback.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use credentia_contracts::provider::Provider;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Arc<dyn Fn(Option<&Provider>) + Send + Sync>;

struct ChannelState {
    current: Option<Provider>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_id: u64,
}

pub struct SelectionChannel {
    state: Mutex<ChannelState>,
    dispatch: Mutex<()>,
}

impl SelectionChannel {
    pub fn new(initial: Option<Provider>) -> Self {
        Self {
            state: Mutex::new(ChannelState {
                current: initial,
                observers: Vec::new(),
                next_id: 0,
            }),
            dispatch: Mutex::new(()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ChannelState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn dispatch_lock(&self) -> MutexGuard<'_, ()> {
        self.dispatch.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn deliver(observers: Vec<Observer>, value: Option<&Provider>) {
        debug!(
            provider_id = value.map(|p| p.id.as_str()).unwrap_or("<none>"),
            observer_count = observers.len(),
            "selection published"
        );

        for observer in observers {
            observer(value);
        }
    }

    /// The most recently published value.
    pub fn current(&self) -> Option<Provider> {
        self.lock().current.clone()
    }

    /// Id of the currently selected provider, if any.
    pub fn current_id(&self) -> Option<String> {
        self.lock().current.as_ref().map(|p| p.id.clone())
    }

    /// Register `observer` and immediately deliver the retained value to it.
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(Option<&Provider>) + Send + Sync + 'static,
    {
        let observer: Observer = Arc::new(observer);
        let _dispatch = self.dispatch_lock();
        let (id, current) = {
            let mut state = self.lock();
            let id = SubscriptionId(state.next_id);
            state.next_id += 1;
            state.observers.push((id, Arc::clone(&observer)));
            (id, state.current.clone())
        };

        observer(current.as_ref());
        id
    }

    /// Remove an observer. Returns false if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut state = self.lock();
        let before = state.observers.len();
        state.observers.retain(|(sid, _)| *sid != id);
        state.observers.len() != before
    }

    /// Retain `value` and deliver it to every observer in subscription order.
    pub fn publish(&self, value: Option<Provider>) {
        let _dispatch = self.dispatch_lock();
        let observers: Vec<Observer> = {
            let mut state = self.lock();
            state.current = value.clone();
            state.observers.iter().map(|(_, o)| Arc::clone(o)).collect()
        };
        Self::deliver(observers, value.as_ref());
    }

    /// Replace the retained value with `updated` and notify observers, but
    /// only if the retained provider has the same id. The id check and the
    /// swap happen under one lock, so a newer selection is never overwritten.
    ///
    /// Returns whether anything was published.
    pub fn republish_if_selected(&self, updated: &Provider) -> bool {
        let _dispatch = self.dispatch_lock();
        let observers: Vec<Observer> = {
            let mut state = self.lock();
            if state.current.as_ref().map(|p| p.id.as_str()) != Some(updated.id.as_str()) {
                return false;
            }
            state.current = Some(updated.clone());
            state.observers.iter().map(|(_, o)| Arc::clone(o)).collect()
        };
        Self::deliver(observers, Some(updated));
        true
    }

    pub fn observer_count(&self) -> usize {
        self.lock().observers.len()
    }
}

impl std::fmt::Debug for SelectionChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("SelectionChannel")
            .field("current", &state.current.as_ref().map(|p| &p.id))
            .field("observers", &state.observers.len())
            .finish()
    }
}
