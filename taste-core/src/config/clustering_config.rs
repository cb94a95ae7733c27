use serde::{Deserialize, Serialize};

use super::defaults;

/// Persona-clustering configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    /// Smallest k tried by the bounded k search.
    pub k_min: usize,
    /// Largest k tried. The search is additionally capped at n/2 so small
    /// inputs cannot ask for more clusters than the data supports.
    pub k_max: usize,
    /// Below this many training items, refresh fails with InsufficientData.
    pub min_training_items: usize,
    /// Minimum acceptable mean silhouette. Clusterings below it still win
    /// the k search but are flagged `quality_low`.
    pub silhouette_threshold: f64,
    /// Cosine similarity an old centroid must reach against a new one for
    /// its label to carry over.
    pub label_carry_threshold: f64,
    /// Lloyd-iteration cap per k.
    pub max_iterations: usize,
    /// Recent-window length for training-sample selection.
    pub recent_window_days: i64,
    /// Cap on the random sample of items older than the recent window.
    pub historical_sample_size: usize,
    /// Mean cosine similarity to the global mean above which the input is
    /// considered degenerate (one indistinct blob).
    pub degenerate_similarity: f64,
    /// Representative item ids retained per persona.
    pub sample_item_ids_per_persona: usize,
    /// Seed for centroid init and historical sampling; fixed for
    /// reproducible refreshes.
    pub seed: u64,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            k_min: defaults::DEFAULT_K_MIN,
            k_max: defaults::DEFAULT_K_MAX,
            min_training_items: defaults::DEFAULT_MIN_TRAINING_ITEMS,
            silhouette_threshold: defaults::DEFAULT_SILHOUETTE_THRESHOLD,
            label_carry_threshold: defaults::DEFAULT_LABEL_CARRY_THRESHOLD,
            max_iterations: defaults::DEFAULT_MAX_ITERATIONS,
            recent_window_days: defaults::DEFAULT_RECENT_WINDOW_DAYS,
            historical_sample_size: defaults::DEFAULT_HISTORICAL_SAMPLE_SIZE,
            degenerate_similarity: defaults::DEFAULT_DEGENERATE_SIMILARITY,
            sample_item_ids_per_persona: defaults::DEFAULT_SAMPLE_ITEM_IDS_PER_PERSONA,
            seed: defaults::DEFAULT_CLUSTERING_SEED,
        }
    }
}
