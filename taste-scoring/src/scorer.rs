//! Multi-factor candidate scorer.
//!
//! ```text
//! final_score = content_score × channel_boost × view_health × recency_factor
//! ```
//!
//! Every factor is returned alongside the final number so rankings can be
//! inspected factor by factor.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use taste_core::config::{AffinityConfig, ScoringConfig};
use taste_core::models::{CandidateItem, PersonaSet, ScoreResult};
use taste_decay::DecayEngine;

use crate::curves;

/// Pure scoring component. Holds configuration only — no mutable state, no
/// side effects, safe to call concurrently.
pub struct VideoScorer {
    config: ScoringConfig,
    affinity: AffinityConfig,
    decay: DecayEngine,
}

impl VideoScorer {
    pub fn new(config: ScoringConfig, affinity: AffinityConfig, decay: DecayEngine) -> Self {
        Self {
            config,
            affinity,
            decay,
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score one candidate against a persona snapshot and a channel-affinity
    /// table at time `now`.
    ///
    /// Never fails: a missing embedding or an empty persona set falls back
    /// to the configured neutral content score, flagged on the result, so
    /// the item still receives a metadata-only ranking.
    pub fn score(
        &self,
        candidate: &CandidateItem,
        persona_set: &PersonaSet,
        channel_affinities: &HashMap<String, f64>,
        now: DateTime<Utc>,
    ) -> ScoreResult {
        let embedding_missing = candidate.embedding.is_none();

        let (content_score, matching_persona_index) = match &candidate.embedding {
            Some(embedding) if !persona_set.is_empty() => {
                let mut best = (self.config.fallback_content_score, None);
                let mut best_raw = f64::NEG_INFINITY;
                for (index, persona) in persona_set.personas.iter().enumerate() {
                    // Negative similarity carries no useful ranking signal;
                    // floor it so content_score stays in [0, 1].
                    let similarity = persona.centroid.cosine_similarity(embedding).max(0.0);
                    let activity = self.decay.decayed_activity(persona, now);
                    let weighted = similarity * activity;
                    if weighted > best_raw {
                        best_raw = weighted;
                        best = (weighted, Some(index));
                    }
                }
                best
            }
            _ => (self.config.fallback_content_score, None),
        };
        let used_fallback = matching_persona_index.is_none();

        let channel_boost = channel_affinities
            .get(&candidate.channel_id)
            .copied()
            .unwrap_or(1.0)
            .clamp(self.affinity.min_score, self.affinity.max_score);
        let view_health = curves::view_health(candidate.view_count, &self.config);
        let recency_factor = curves::recency_factor(candidate.upload_timestamp, now, &self.config);

        ScoreResult {
            item_id: candidate.item_id.clone(),
            final_score: content_score * channel_boost * view_health * recency_factor,
            content_score,
            matching_persona_index,
            channel_boost,
            view_health,
            recency_factor,
            embedding_missing,
            used_fallback,
        }
    }

    /// Score a batch and order it: `final_score` descending, ties broken by
    /// `recency_factor` descending, then `item_id` ascending. The tie-break
    /// chain is total, so the ordering is reproducible run to run.
    pub fn score_batch(
        &self,
        candidates: &[CandidateItem],
        persona_set: &PersonaSet,
        channel_affinities: &HashMap<String, f64>,
        now: DateTime<Utc>,
    ) -> Vec<ScoreResult> {
        let mut results: Vec<ScoreResult> = candidates
            .iter()
            .map(|c| self.score(c, persona_set, channel_affinities, now))
            .collect();

        results.sort_by(|a, b| {
            b.final_score
                .partial_cmp(&a.final_score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| {
                    b.recency_factor
                        .partial_cmp(&a.recency_factor)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .then_with(|| a.item_id.cmp(&b.item_id))
        });
        results
    }
}

impl Default for VideoScorer {
    fn default() -> Self {
        Self::new(
            ScoringConfig::default(),
            AffinityConfig::default(),
            DecayEngine::default(),
        )
    }
}
