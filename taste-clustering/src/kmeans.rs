//! Seeded k-means with k-means++ initialization.
//!
//! Lloyd iterations run the assignment step in parallel; an empty cluster is
//! reseeded to the point farthest from its current centroid so every run
//! produces exactly k non-empty clusters.

use rand::rngs::StdRng;
use rand::Rng;
use rayon::prelude::*;

use taste_core::errors::ClusteringError;
use taste_core::EmbeddingVector;

use crate::cancel::CancelToken;

/// A completed k-means run.
#[derive(Debug, Clone)]
pub struct KMeansResult {
    /// Cluster index per input point.
    pub assignments: Vec<usize>,
    /// One centroid per cluster, all non-empty.
    pub centroids: Vec<EmbeddingVector>,
    /// Within-cluster sum of squared distances.
    pub inertia: f64,
}

/// Run k-means over `points` with `k` clusters.
///
/// Deterministic for a given rng state. `k` must satisfy `2 <= k <= n`;
/// the caller (the k search) guarantees that.
pub fn run(
    points: &[EmbeddingVector],
    k: usize,
    max_iterations: usize,
    rng: &mut StdRng,
    cancel: &CancelToken,
) -> Result<KMeansResult, ClusteringError> {
    debug_assert!(k >= 2 && k <= points.len());

    let mut centroids = plus_plus_init(points, k, rng);
    let mut assignments = vec![0usize; points.len()];

    for _iteration in 0..max_iterations {
        if cancel.is_cancelled() {
            return Err(ClusteringError::Cancelled);
        }

        // Assignment step, in parallel.
        let new_assignments: Vec<usize> = points
            .par_iter()
            .map(|p| nearest_centroid(p, &centroids).0)
            .collect();

        let changed = new_assignments != assignments;
        assignments = new_assignments;

        // Update step: mean of members; reseed empty clusters.
        for c in 0..k {
            let members: Vec<&EmbeddingVector> = points
                .iter()
                .zip(assignments.iter())
                .filter(|(_, &a)| a == c)
                .map(|(p, _)| p)
                .collect();

            match EmbeddingVector::mean_of(&members) {
                Some(mean) => centroids[c] = mean,
                None => {
                    // Empty cluster: grab the point farthest from its own
                    // centroid and make it the new seed.
                    if let Some((idx, _)) = points
                        .iter()
                        .enumerate()
                        .map(|(i, p)| (i, p.distance_sq(&centroids[assignments[i]])))
                        .max_by(|(_, a), (_, b)| {
                            a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal)
                        })
                    {
                        centroids[c] = points[idx].clone();
                        assignments[idx] = c;
                    }
                }
            }
        }

        if !changed {
            break;
        }
    }

    let inertia = points
        .iter()
        .zip(assignments.iter())
        .map(|(p, &a)| p.distance_sq(&centroids[a]))
        .sum();

    Ok(KMeansResult {
        assignments,
        centroids,
        inertia,
    })
}

/// k-means++ seeding: first centroid uniform, the rest sampled with
/// probability proportional to squared distance from the nearest chosen
/// centroid. Spreads the seeds, which stabilizes the silhouette comparison
/// across candidate k values.
fn plus_plus_init(points: &[EmbeddingVector], k: usize, rng: &mut StdRng) -> Vec<EmbeddingVector> {
    let mut centroids: Vec<EmbeddingVector> = Vec::with_capacity(k);
    centroids.push(points[rng.gen_range(0..points.len())].clone());

    while centroids.len() < k {
        let distances: Vec<f64> = points
            .iter()
            .map(|p| {
                centroids
                    .iter()
                    .map(|c| p.distance_sq(c))
                    .fold(f64::INFINITY, f64::min)
            })
            .collect();
        let total: f64 = distances.iter().sum();
        if total <= f64::EPSILON {
            // All remaining mass sits on already-chosen points; fall back to
            // uniform picks so init still terminates on degenerate data.
            centroids.push(points[rng.gen_range(0..points.len())].clone());
            continue;
        }
        let mut target = rng.gen::<f64>() * total;
        let mut chosen = points.len() - 1;
        for (i, d) in distances.iter().enumerate() {
            target -= d;
            if target <= 0.0 {
                chosen = i;
                break;
            }
        }
        centroids.push(points[chosen].clone());
    }
    centroids
}

/// Index and squared distance of the nearest centroid.
pub fn nearest_centroid(point: &EmbeddingVector, centroids: &[EmbeddingVector]) -> (usize, f64) {
    let mut best = (0usize, f64::INFINITY);
    for (i, c) in centroids.iter().enumerate() {
        let d = point.distance_sq(c);
        if d < best.1 {
            best = (i, d);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn well_separated_points() -> Vec<EmbeddingVector> {
        let mut points = Vec::new();
        for i in 0..20 {
            let jitter = (i % 5) as f32 * 0.01;
            points.push(EmbeddingVector::new(vec![1.0 + jitter, 0.0, jitter]));
            points.push(EmbeddingVector::new(vec![0.0, 1.0 + jitter, jitter]));
        }
        points
    }

    #[test]
    fn separates_two_obvious_clusters() {
        let points = well_separated_points();
        let mut rng = StdRng::seed_from_u64(42);
        let result = run(&points, 2, 100, &mut rng, &CancelToken::new()).unwrap();

        // Even indices were planted near [1,0], odd near [0,1]; each group
        // must land in a single cluster.
        let first = result.assignments[0];
        let second = result.assignments[1];
        assert_ne!(first, second);
        for (i, &a) in result.assignments.iter().enumerate() {
            let expected = if i % 2 == 0 { first } else { second };
            assert_eq!(a, expected, "point {} landed in the wrong cluster", i);
        }
    }

    #[test]
    fn deterministic_under_a_fixed_seed() {
        let points = well_separated_points();
        let run_once = |seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            run(&points, 2, 100, &mut rng, &CancelToken::new()).unwrap()
        };
        let a = run_once(7);
        let b = run_once(7);
        assert_eq!(a.assignments, b.assignments);
        assert_eq!(a.centroids, b.centroids);
    }

    #[test]
    fn all_clusters_are_non_empty() {
        let points = well_separated_points();
        let mut rng = StdRng::seed_from_u64(3);
        let result = run(&points, 4, 100, &mut rng, &CancelToken::new()).unwrap();
        for c in 0..4 {
            assert!(
                result.assignments.iter().any(|&a| a == c),
                "cluster {} is empty",
                c
            );
        }
    }

    #[test]
    fn cancelled_token_aborts_the_run() {
        let points = well_separated_points();
        let mut rng = StdRng::seed_from_u64(1);
        let token = CancelToken::new();
        token.cancel();
        let err = run(&points, 2, 100, &mut rng, &token).unwrap_err();
        assert!(matches!(err, ClusteringError::Cancelled));
    }

    #[test]
    fn identical_points_still_terminate() {
        let points: Vec<EmbeddingVector> =
            (0..10).map(|_| EmbeddingVector::new(vec![0.5, 0.5])).collect();
        let mut rng = StdRng::seed_from_u64(9);
        let result = run(&points, 2, 100, &mut rng, &CancelToken::new()).unwrap();
        assert_eq!(result.assignments.len(), 10);
    }
}
