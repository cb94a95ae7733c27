//! Metadata multiplier curves.
//!
//! Both curves are bounded and configurable; the shipped bands are
//! [0.7, 1.2] for view health and [0.8, 1.1] for recency.

use chrono::{DateTime, Utc};

use taste_core::config::ScoringConfig;
use taste_core::constants::SECONDS_PER_DAY;

/// View-count health in `[view_health_min, view_health_max]`.
///
/// A plateau at the maximum across the configured sweet spot, falling off
/// through one-sided logistic ramps on either side — in log-view space, so
/// the falloff is symmetric in orders of magnitude. Both dead content and
/// purely-viral content are penalized toward the minimum.
pub fn view_health(view_count: u64, cfg: &ScoringConfig) -> f64 {
    let span = cfg.view_health_max - cfg.view_health_min;
    if span <= f64::EPSILON {
        return cfg.view_health_max;
    }

    // Saturating: u64::MAX views is a valid input and must not overflow.
    let x = (view_count.saturating_add(1) as f64).log10();
    let lo = (cfg.view_sweet_spot_low.saturating_add(1) as f64).log10();
    let hi = (cfg.view_sweet_spot_high.saturating_add(1) as f64).log10();
    if (lo..=hi).contains(&x) {
        return cfg.view_health_max;
    }

    let decades = cfg.view_falloff_decades.max(f64::EPSILON);
    // Logistic ramp centered half a falloff-width outside the plateau edge;
    // the /8 scale puts the curve within ~2% of its limits at the edges.
    let t = if x < lo {
        (x - (lo - decades / 2.0)) / (decades / 8.0)
    } else {
        ((hi + decades / 2.0) - x) / (decades / 8.0)
    };
    let s = 1.0 / (1.0 + (-t).exp());
    (cfg.view_health_min + span * s).clamp(cfg.view_health_min, cfg.view_health_max)
}

/// Upload-recency factor in `[recency_min, recency_max]`.
///
/// Monotonically non-increasing in age, exponential toward the floor —
/// old-but-relevant content keeps a guaranteed minimum weight instead of
/// being zeroed out.
pub fn recency_factor(upload: DateTime<Utc>, now: DateTime<Utc>, cfg: &ScoringConfig) -> f64 {
    let span = cfg.recency_max - cfg.recency_min;
    if span <= f64::EPSILON || cfg.recency_half_life_days <= 0.0 {
        return cfg.recency_max;
    }
    let age_days = (now - upload).num_seconds().max(0) as f64 / SECONDS_PER_DAY;
    cfg.recency_min + span * (-age_days / cfg.recency_half_life_days).exp()
}
