//! ChannelAffinityTracker — concurrent per-key counters via DashMap.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use taste_core::config::AffinityConfig;
use taste_core::models::{ChannelAffinity, SignalType};

/// Thread-safe channel affinity tracker.
///
/// The read-modify-write for a signal happens inside the map's entry guard,
/// which serializes updates per (user, channel) key; distinct keys proceed
/// fully in parallel.
pub struct ChannelAffinityTracker {
    config: AffinityConfig,
    entries: DashMap<(String, String), ChannelAffinity>,
}

impl ChannelAffinityTracker {
    pub fn new(config: AffinityConfig) -> Self {
        Self {
            config,
            entries: DashMap::new(),
        }
    }

    /// Record one signal against a channel, creating the entry lazily on
    /// first contact. Returns the updated affinity (cloned snapshot).
    pub fn record_signal(
        &self,
        user_id: &str,
        channel_id: &str,
        signal_type: SignalType,
        now: DateTime<Utc>,
    ) -> ChannelAffinity {
        let key = (user_id.to_string(), channel_id.to_string());
        let mut entry = self
            .entries
            .entry(key)
            .or_insert_with(|| ChannelAffinity::new(user_id, channel_id, now));
        entry.apply(signal_type, &self.config, now);
        entry.clone()
    }

    /// Current affinity for a channel, if any signal has touched it.
    pub fn affinity_for(&self, user_id: &str, channel_id: &str) -> Option<ChannelAffinity> {
        self.entries
            .get(&(user_id.to_string(), channel_id.to_string()))
            .map(|r| r.clone())
    }

    /// Snapshot of all of a user's channel multipliers, for scoring.
    pub fn user_table(&self, user_id: &str) -> HashMap<String, f64> {
        self.entries
            .iter()
            .filter(|r| r.key().0 == user_id)
            .map(|r| (r.key().1.clone(), r.value().affinity_score))
            .collect()
    }

    /// Total number of (user, channel) entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ChannelAffinityTracker {
    fn default() -> Self {
        Self::new(AffinityConfig::default())
    }
}
