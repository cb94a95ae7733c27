use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::AffinityConfig;
use crate::models::signal::SignalType;

/// Per-(user, channel) affinity multiplier with its underlying counters.
///
/// The score is an explicit linear model over the counters, recomputed on
/// every signal and clamped to the configured band — auditable by design,
/// not learned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelAffinity {
    pub user_id: String,
    pub channel_id: String,
    pub affinity_score: f64,
    pub videos_watched: u64,
    pub thumbs_up: u64,
    pub thumbs_down: u64,
    pub updated_at: DateTime<Utc>,
}

impl ChannelAffinity {
    /// Fresh entry with neutral affinity.
    pub fn new(
        user_id: impl Into<String>,
        channel_id: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            channel_id: channel_id.into(),
            affinity_score: 1.0,
            videos_watched: 0,
            thumbs_up: 0,
            thumbs_down: 0,
            updated_at: now,
        }
    }

    /// Apply one signal: bump the matching counter and recompute the score.
    /// `NotInterested` is deliberately a no-op here — it never moves channel
    /// affinity, only the signal log.
    pub fn apply(&mut self, signal_type: SignalType, cfg: &AffinityConfig, now: DateTime<Utc>) {
        match signal_type {
            SignalType::Watched => self.videos_watched += 1,
            SignalType::Liked => self.thumbs_up += 1,
            SignalType::Disliked => self.thumbs_down += 1,
            SignalType::NotInterested => return,
        }
        self.recompute(cfg);
        self.updated_at = now;
    }

    /// Recompute the affinity score from the counters:
    ///
    /// ```text
    /// 1.0 + up_weight·thumbs_up − down_weight·thumbs_down
    ///     + watch_weight·min(videos_watched, watch_cap)
    /// ```
    ///
    /// clamped to [min_score, max_score].
    pub fn recompute(&mut self, cfg: &AffinityConfig) {
        let watched = self.videos_watched.min(cfg.watch_cap) as f64;
        let raw = 1.0 + cfg.thumbs_up_weight * self.thumbs_up as f64
            - cfg.thumbs_down_weight * self.thumbs_down as f64
            + cfg.watch_weight * watched;
        self.affinity_score = raw.clamp(cfg.min_score, cfg.max_score);
    }
}
