//! SignalStore — concurrent per-user append-only signal log via DashMap.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::debug;

use taste_core::models::Signal;

/// Thread-safe append-only signal store keyed by user id.
///
/// Appends for different users proceed fully in parallel; appends for one
/// user serialize on that user's map entry. Duplicate detection covers the
/// exact `(item_id, signal_type, timestamp)` triple — replaying the same
/// signal twice never double-counts.
pub struct SignalStore {
    signals: DashMap<String, Vec<Signal>>,
}

impl SignalStore {
    pub fn new() -> Self {
        Self {
            signals: DashMap::new(),
        }
    }

    /// Append a signal. Returns `false` when the exact signal was already
    /// recorded (the append is dropped).
    pub fn record(&self, signal: Signal) -> bool {
        let mut entry = self.signals.entry(signal.user_id.clone()).or_default();
        let duplicate = entry.iter().any(|s| {
            s.item_id == signal.item_id
                && s.signal_type == signal.signal_type
                && s.timestamp == signal.timestamp
        });
        if duplicate {
            debug!(
                user_id = %signal.user_id,
                item_id = %signal.item_id,
                "duplicate signal dropped"
            );
            return false;
        }
        entry.push(signal);
        true
    }

    /// All signals for a user, in append order (cloned snapshot).
    pub fn signals_for(&self, user_id: &str) -> Vec<Signal> {
        self.signals
            .get(user_id)
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Positive (watched/liked) signals for a user.
    pub fn positive_signals_for(&self, user_id: &str) -> Vec<Signal> {
        self.signals
            .get(user_id)
            .map(|r| {
                r.iter()
                    .filter(|s| s.signal_type.is_positive())
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of signals recorded for a user.
    pub fn len_for(&self, user_id: &str) -> usize {
        self.signals.get(user_id).map(|r| r.len()).unwrap_or(0)
    }

    /// Drop signals older than `cutoff` for one user, returning how many
    /// were removed. Retention policy is the caller's concern.
    pub fn prune_before(&self, user_id: &str, cutoff: DateTime<Utc>) -> usize {
        match self.signals.get_mut(user_id) {
            Some(mut entry) => {
                let before = entry.len();
                entry.retain(|s| s.timestamp >= cutoff);
                before - entry.len()
            }
            None => 0,
        }
    }

    /// Users with at least one signal.
    pub fn user_ids(&self) -> Vec<String> {
        self.signals.iter().map(|r| r.key().clone()).collect()
    }
}

impl Default for SignalStore {
    fn default() -> Self {
        Self::new()
    }
}
