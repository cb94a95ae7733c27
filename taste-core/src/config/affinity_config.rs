use serde::{Deserialize, Serialize};

use super::defaults;

/// Channel-affinity linear model weights and clamp band.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AffinityConfig {
    pub min_score: f64,
    pub max_score: f64,
    pub thumbs_up_weight: f64,
    pub thumbs_down_weight: f64,
    pub watch_weight: f64,
    /// Watched-count contribution caps here so sheer volume cannot dominate
    /// explicit likes and dislikes.
    pub watch_cap: u64,
}

impl Default for AffinityConfig {
    fn default() -> Self {
        Self {
            min_score: defaults::DEFAULT_AFFINITY_MIN,
            max_score: defaults::DEFAULT_AFFINITY_MAX,
            thumbs_up_weight: defaults::DEFAULT_THUMBS_UP_WEIGHT,
            thumbs_down_weight: defaults::DEFAULT_THUMBS_DOWN_WEIGHT,
            watch_weight: defaults::DEFAULT_WATCH_WEIGHT,
            watch_cap: defaults::DEFAULT_WATCH_CAP,
        }
    }
}
