//! PersonaManager: builds and maintains a user's persona set.
//!
//! A refresh is a full clustering run producing a brand-new immutable
//! `PersonaSet`; the lightweight `update_activity` path nudges one persona
//! in an existing set without reclustering.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use taste_core::config::ClusteringConfig;
use taste_core::errors::ClusteringError;
use taste_core::models::{ActivityScore, Persona, PersonaSet};
use taste_core::EmbeddingVector;
use taste_decay::DecayEngine;

use crate::cancel::CancelToken;
use crate::kmeans;
use crate::quality;
use crate::sampling::TrainingSample;

/// Clusters positively-signaled item embeddings into personas and keeps
/// their activity scores current.
pub struct PersonaManager {
    config: ClusteringConfig,
    decay: DecayEngine,
}

impl PersonaManager {
    pub fn new(config: ClusteringConfig, decay: DecayEngine) -> Self {
        Self { config, decay }
    }

    pub fn config(&self) -> &ClusteringConfig {
        &self.config
    }

    /// Run a full clustering refresh.
    ///
    /// `samples` is the already-selected training set (see
    /// [`crate::sampling::select_training_samples`]). `previous` is only read
    /// for version lineage and label carry-over; it is never mutated.
    pub fn refresh(
        &self,
        user_id: &str,
        samples: &[TrainingSample],
        previous: Option<&PersonaSet>,
        k_override: Option<usize>,
        now: DateTime<Utc>,
        cancel: &CancelToken,
    ) -> Result<PersonaSet, ClusteringError> {
        let n = samples.len();
        if n < self.config.min_training_items {
            return Err(ClusteringError::InsufficientData {
                required: self.config.min_training_items,
                actual: n,
            });
        }

        let points: Vec<EmbeddingVector> =
            samples.iter().map(|s| s.embedding.clone()).collect();
        self.check_degenerate(&points)?;

        // Bounded k search (or a single caller-forced k).
        let candidates = self.candidate_ks(n, k_override);
        debug!(user_id, n, ?candidates, "starting persona refresh");

        let mut best: Option<(usize, kmeans::KMeansResult, f64)> = None;
        for k in candidates {
            if cancel.is_cancelled() {
                return Err(ClusteringError::Cancelled);
            }
            let mut rng = StdRng::seed_from_u64(self.config.seed.wrapping_add(k as u64));
            let result = kmeans::run(&points, k, self.config.max_iterations, &mut rng, cancel)?;
            let score = quality::silhouette(&points, &result.assignments, k);
            debug!(k, silhouette = score, inertia = result.inertia, "candidate clustering");
            let better = match &best {
                Some((_, _, best_score)) => score > *best_score,
                None => true,
            };
            if better {
                best = Some((k, result, score));
            }
        }
        // candidate_ks never returns an empty set for n >= min_training_items.
        let (k, result, silhouette_score) = best.ok_or_else(|| ClusteringError::Degenerate {
            reason: "no candidate k produced a clustering".to_string(),
        })?;
        let quality_low = silhouette_score < self.config.silhouette_threshold;

        let personas =
            self.build_personas(user_id, samples, &result, k, previous, now);

        let version = previous.map(|p| p.version).unwrap_or(0) + 1;
        info!(
            user_id,
            k,
            silhouette = silhouette_score,
            quality_low,
            version,
            "persona refresh complete"
        );

        Ok(PersonaSet {
            user_id: user_id.to_string(),
            version,
            revision: 0,
            personas,
            k,
            silhouette_score,
            quality_low,
            training_sample_count: n,
            created_at: now,
        })
    }

    /// Collapse to a single persona spanning all samples. Used when the
    /// input is too homogeneous to cluster — recoverable per the error
    /// contract, not a failure mode.
    pub fn single_persona_set(
        &self,
        user_id: &str,
        samples: &[TrainingSample],
        previous: Option<&PersonaSet>,
        now: DateTime<Utc>,
    ) -> PersonaSet {
        let points: Vec<&EmbeddingVector> = samples.iter().map(|s| &s.embedding).collect();
        let centroid = EmbeddingVector::mean_of(&points)
            .unwrap_or_else(|| EmbeddingVector::new(Vec::new()));
        let last_activity = samples
            .iter()
            .map(|s| s.timestamp)
            .max()
            .unwrap_or(now);
        let sample_item_ids = newest_item_ids(samples, self.config.sample_item_ids_per_persona);

        let persona = Persona {
            user_id: user_id.to_string(),
            persona_index: 0,
            centroid,
            activity_score: ActivityScore::new(1.0),
            last_activity_timestamp: last_activity,
            member_count: samples.len(),
            sample_item_ids,
            label: None,
        };
        PersonaSet {
            user_id: user_id.to_string(),
            version: previous.map(|p| p.version).unwrap_or(0) + 1,
            revision: 0,
            personas: vec![persona],
            k: 1,
            silhouette_score: 0.0,
            quality_low: true,
            training_sample_count: samples.len(),
            created_at: now,
        }
    }

    /// Lightweight single-persona boost: find the nearest persona to the
    /// item embedding and nudge its activity toward 1.0. No reclustering.
    /// `None` when the set has no personas.
    pub fn update_activity(
        &self,
        set: &PersonaSet,
        item_embedding: &EmbeddingVector,
        timestamp: DateTime<Utc>,
    ) -> Option<PersonaSet> {
        let (index, similarity) = set.nearest_persona(item_embedding)?;
        debug!(
            user_id = %set.user_id,
            persona_index = index,
            similarity,
            "boosting persona activity"
        );
        set.with_activity_boost(index, self.decay.config().boost_increment, timestamp)
    }

    /// Reject inputs that cannot form distinct clusters: when every point
    /// sits essentially on top of the global mean direction, k-means would
    /// manufacture arbitrary splits.
    fn check_degenerate(&self, points: &[EmbeddingVector]) -> Result<(), ClusteringError> {
        let refs: Vec<&EmbeddingVector> = points.iter().collect();
        let mean = match EmbeddingVector::mean_of(&refs) {
            Some(m) => m,
            None => {
                return Err(ClusteringError::Degenerate {
                    reason: "embeddings have inconsistent dimensions".to_string(),
                })
            }
        };
        let mean_similarity: f64 = points
            .iter()
            .map(|p| p.cosine_similarity(&mean))
            .sum::<f64>()
            / points.len() as f64;
        if mean_similarity >= self.config.degenerate_similarity {
            return Err(ClusteringError::Degenerate {
                reason: format!(
                    "mean similarity to centroid {:.4} exceeds {:.4}",
                    mean_similarity, self.config.degenerate_similarity
                ),
            });
        }
        Ok(())
    }

    /// The k values the search will try: the configured range capped at n/2,
    /// or the caller's forced k clamped to something runnable.
    fn candidate_ks(&self, n: usize, k_override: Option<usize>) -> Vec<usize> {
        if let Some(k) = k_override {
            return vec![k.clamp(2, n)];
        }
        let k_max = self.config.k_max.min(n / 2).max(2);
        let k_min = self.config.k_min.clamp(2, k_max);
        (k_min..=k_max).collect()
    }

    fn build_personas(
        &self,
        user_id: &str,
        samples: &[TrainingSample],
        result: &kmeans::KMeansResult,
        k: usize,
        previous: Option<&PersonaSet>,
        now: DateTime<Utc>,
    ) -> Vec<Persona> {
        // Largest clusters first, mirroring how the set is displayed.
        let mut order: Vec<usize> = (0..k).collect();
        let sizes: Vec<usize> = (0..k)
            .map(|c| result.assignments.iter().filter(|&&a| a == c).count())
            .collect();
        order.sort_by_key(|&c| std::cmp::Reverse(sizes[c]));

        let mut personas: Vec<Persona> = order
            .into_iter()
            .enumerate()
            .map(|(index, cluster)| {
                let members: Vec<&TrainingSample> = samples
                    .iter()
                    .zip(result.assignments.iter())
                    .filter(|(_, &a)| a == cluster)
                    .map(|(s, _)| s)
                    .collect();

                let last_activity = members
                    .iter()
                    .map(|s| s.timestamp)
                    .max()
                    .unwrap_or(now);
                // Fresh clusters start fully active; stale ones start at
                // their already-decayed level so a refresh cannot revive a
                // dormant interest by itself.
                let activity = if self.decay.within_half_life(last_activity, now) {
                    1.0
                } else {
                    self.decay
                        .decayed(1.0, DecayEngine::elapsed_days(last_activity, now))
                };

                let mut member_samples: Vec<&TrainingSample> = members.clone();
                member_samples.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
                let sample_item_ids = member_samples
                    .iter()
                    .take(self.config.sample_item_ids_per_persona)
                    .map(|s| s.item_id.clone())
                    .collect();

                Persona {
                    user_id: user_id.to_string(),
                    persona_index: index,
                    centroid: result.centroids[cluster].clone(),
                    activity_score: ActivityScore::new(activity),
                    last_activity_timestamp: last_activity,
                    member_count: members.len(),
                    sample_item_ids,
                    label: None,
                }
            })
            .collect();

        if let Some(previous) = previous {
            self.carry_labels(&mut personas, previous);
        }
        personas
    }

    /// Best-effort label carry-over: greedily match new centroids to old
    /// labeled personas by cosine similarity, each old label used at most
    /// once, matches below the threshold cleared. Cluster identity across
    /// independent runs is not stable, so this is an accepted approximation.
    fn carry_labels(&self, personas: &mut [Persona], previous: &PersonaSet) {
        let labeled: Vec<&Persona> = previous
            .personas
            .iter()
            .filter(|p| p.label.is_some())
            .collect();
        if labeled.is_empty() {
            return;
        }

        let mut pairs: Vec<(usize, usize, f64)> = Vec::new();
        for (ni, new) in personas.iter().enumerate() {
            for (oi, old) in labeled.iter().enumerate() {
                let sim = new.centroid.cosine_similarity(&old.centroid);
                if sim >= self.config.label_carry_threshold {
                    pairs.push((ni, oi, sim));
                }
            }
        }
        pairs.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));

        let mut new_taken = vec![false; personas.len()];
        let mut old_taken = vec![false; labeled.len()];
        for (ni, oi, _) in pairs {
            if new_taken[ni] || old_taken[oi] {
                continue;
            }
            personas[ni].label = labeled[oi].label.clone();
            new_taken[ni] = true;
            old_taken[oi] = true;
        }
    }
}

impl Default for PersonaManager {
    fn default() -> Self {
        Self::new(ClusteringConfig::default(), DecayEngine::default())
    }
}

/// Item ids of the newest `limit` samples.
fn newest_item_ids(samples: &[TrainingSample], limit: usize) -> Vec<String> {
    let mut sorted: Vec<&TrainingSample> = samples.iter().collect();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    sorted.iter().take(limit).map(|s| s.item_id.clone()).collect()
}
