use serde::{Deserialize, Serialize};

use super::defaults;

/// Candidate-scoring configuration: fallback constant plus the two
/// metadata-multiplier curves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Content score used when no personas exist or the candidate has no
    /// embedding — keeps cold-start items rankable by metadata alone.
    pub fallback_content_score: f64,
    /// View counts inside [low, high] sit on the view-health plateau.
    pub view_sweet_spot_low: u64,
    pub view_sweet_spot_high: u64,
    /// View-health curve band.
    pub view_health_min: f64,
    pub view_health_max: f64,
    /// Orders of magnitude in view count over which the curve falls from
    /// the plateau to the minimum on either side of the sweet spot.
    pub view_falloff_decades: f64,
    /// Recency curve band. The floor keeps old-but-relevant content alive.
    pub recency_min: f64,
    pub recency_max: f64,
    /// Days for the recency factor to fall halfway toward its floor.
    pub recency_half_life_days: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            fallback_content_score: defaults::DEFAULT_FALLBACK_CONTENT_SCORE,
            view_sweet_spot_low: defaults::DEFAULT_VIEW_SWEET_SPOT_LOW,
            view_sweet_spot_high: defaults::DEFAULT_VIEW_SWEET_SPOT_HIGH,
            view_health_min: defaults::DEFAULT_VIEW_HEALTH_MIN,
            view_health_max: defaults::DEFAULT_VIEW_HEALTH_MAX,
            view_falloff_decades: defaults::DEFAULT_VIEW_FALLOFF_DECADES,
            recency_min: defaults::DEFAULT_RECENCY_MIN,
            recency_max: defaults::DEFAULT_RECENCY_MAX,
            recency_half_life_days: defaults::DEFAULT_RECENCY_HALF_LIFE_DAYS,
        }
    }
}
