//! Cluster-quality metric: mean silhouette score.
//!
//! For each point, `a` = mean distance to its own cluster, `b` = mean
//! distance to the nearest other cluster, silhouette = (b − a) / max(a, b).
//! The mean over all points lands in [-1, 1]; higher is better-separated.

use rayon::prelude::*;

use taste_core::EmbeddingVector;

/// Mean silhouette over all points. Returns 0.0 for fewer than 2 clusters
/// or fewer than 3 points — no separation to measure.
pub fn silhouette(points: &[EmbeddingVector], assignments: &[usize], k: usize) -> f64 {
    if k < 2 || points.len() < 3 || points.len() != assignments.len() {
        return 0.0;
    }

    let scores: Vec<f64> = points
        .par_iter()
        .enumerate()
        .map(|(i, point)| {
            let own = assignments[i];

            // Mean distance to every cluster.
            let mut sums = vec![0.0f64; k];
            let mut counts = vec![0usize; k];
            for (j, other) in points.iter().enumerate() {
                if i == j {
                    continue;
                }
                let c = assignments[j];
                sums[c] += point.distance_sq(other).sqrt();
                counts[c] += 1;
            }

            // Singleton cluster: silhouette is defined as 0.
            if counts[own] == 0 {
                return 0.0;
            }
            let a = sums[own] / counts[own] as f64;

            let b = (0..k)
                .filter(|&c| c != own && counts[c] > 0)
                .map(|c| sums[c] / counts[c] as f64)
                .fold(f64::INFINITY, f64::min);
            if b.is_infinite() {
                return 0.0;
            }

            let denom = a.max(b);
            if denom <= f64::EPSILON {
                0.0
            } else {
                (b - a) / denom
            }
        })
        .collect();

    scores.iter().sum::<f64>() / scores.len() as f64
}
