//! Training-sample selection: the full recent window plus a bounded random
//! sample of older history, so a refresh cannot silently drop a dormant
//! interest just because it fell out of the last few months.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;

use taste_core::config::ClusteringConfig;
use taste_core::constants::MAX_TRAINING_SAMPLES;
use taste_core::EmbeddingVector;

/// One positively-signaled item ready for clustering.
#[derive(Debug, Clone)]
pub struct TrainingSample {
    pub item_id: String,
    pub embedding: EmbeddingVector,
    pub timestamp: DateTime<Utc>,
}

impl TrainingSample {
    pub fn new(
        item_id: impl Into<String>,
        embedding: EmbeddingVector,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            embedding,
            timestamp,
        }
    }
}

/// Select the training set for a clustering run: everything inside the
/// recent window, plus up to `historical_sample_size` older items chosen by
/// a seeded uniform sample. The combined set is capped at
/// `MAX_TRAINING_SAMPLES` (newest first when truncating).
pub fn select_training_samples(
    mut samples: Vec<TrainingSample>,
    config: &ClusteringConfig,
    now: DateTime<Utc>,
) -> Vec<TrainingSample> {
    let cutoff = now - Duration::days(config.recent_window_days);
    let (recent, historical): (Vec<_>, Vec<_>) =
        samples.drain(..).partition(|s| s.timestamp >= cutoff);

    let mut selected = recent;
    if !historical.is_empty() {
        let take = config.historical_sample_size.min(historical.len());
        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut picks: Vec<usize> = index::sample(&mut rng, historical.len(), take).into_vec();
        picks.sort_unstable();
        for i in picks {
            selected.push(historical[i].clone());
        }
    }

    if selected.len() > MAX_TRAINING_SAMPLES {
        selected.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        selected.truncate(MAX_TRAINING_SAMPLES);
    }
    selected
}
