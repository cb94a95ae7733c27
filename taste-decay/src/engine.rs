use chrono::{DateTime, Utc};

use taste_core::config::DecayConfig;
use taste_core::constants::SECONDS_PER_DAY;
use taste_core::models::Persona;

use crate::formula;

/// Decay engine: applies the asymptotic decay formula to persona activity
/// from `last_activity_timestamp`, lazily at read time.
///
/// Nothing is ever written back — decayed values are recomputed on every
/// read, so correctness never depends on a background materialization job.
pub struct DecayEngine {
    config: DecayConfig,
}

impl DecayEngine {
    pub fn new(config: DecayConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecayConfig {
        &self.config
    }

    /// Days elapsed between two timestamps, never negative.
    pub fn elapsed_days(since: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
        (now - since).num_seconds().max(0) as f64 / SECONDS_PER_DAY
    }

    /// Decay a raw activity value over `elapsed_days`.
    pub fn decayed(&self, activity: f64, elapsed_days: f64) -> f64 {
        formula::decay(
            activity,
            elapsed_days,
            self.config.half_life_days,
            self.config.activity_floor,
        )
    }

    /// Effective activity of a persona at `now`.
    pub fn decayed_activity(&self, persona: &Persona, now: DateTime<Utc>) -> f64 {
        let elapsed = Self::elapsed_days(persona.last_activity_timestamp, now);
        self.decayed(persona.activity_score.value(), elapsed)
    }

    /// Whether a timestamp still falls within one half-life of `now`.
    /// Used to seed fresh clusters at full activity.
    pub fn within_half_life(&self, ts: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        Self::elapsed_days(ts, now) <= self.config.half_life_days
    }
}

impl Default for DecayEngine {
    fn default() -> Self {
        Self::new(DecayConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use taste_core::models::ActivityScore;
    use taste_core::EmbeddingVector;

    fn persona(activity: f64, last_activity: DateTime<Utc>) -> Persona {
        Persona {
            user_id: "u1".into(),
            persona_index: 0,
            centroid: EmbeddingVector::new(vec![1.0, 0.0]),
            activity_score: ActivityScore::new(activity),
            last_activity_timestamp: last_activity,
            member_count: 12,
            sample_item_ids: vec![],
            label: None,
        }
    }

    #[test]
    fn fresh_persona_keeps_its_activity() {
        let engine = DecayEngine::default();
        let now = Utc::now();
        let p = persona(0.9, now);
        let d = engine.decayed_activity(&p, now);
        assert!((d - 0.9).abs() < 1e-9, "got {}", d);
    }

    #[test]
    fn future_last_activity_does_not_inflate() {
        let engine = DecayEngine::default();
        let now = Utc::now();
        let p = persona(0.9, now + Duration::days(3));
        assert!((engine.decayed_activity(&p, now) - 0.9).abs() < 1e-9);
    }

    #[test]
    fn within_half_life_boundary() {
        let engine = DecayEngine::default();
        let now = Utc::now();
        assert!(engine.within_half_life(now - Duration::days(13), now));
        assert!(!engine.within_half_life(now - Duration::days(15), now));
    }
}
