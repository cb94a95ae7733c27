//! Fixed-length embedding vector with similarity operations.
//!
//! Vectors arrive from an external embedding provider (see
//! [`crate::traits::IEmbeddingProvider`]); this type only stores and
//! compares them.

use serde::{Deserialize, Serialize};

/// A fixed-dimensional embedding vector.
///
/// Similarity math accumulates in `f64` regardless of the `f32` storage,
/// so long vectors don't lose precision in the dot product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingVector(Vec<f32>);

impl EmbeddingVector {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    /// Dimensionality of the vector.
    pub fn dims(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw component access.
    pub fn values(&self) -> &[f32] {
        &self.0
    }

    /// Cosine similarity in [-1.0, 1.0].
    /// Returns 0.0 for zero-length, mismatched-length, or zero-magnitude inputs.
    pub fn cosine_similarity(&self, other: &EmbeddingVector) -> f64 {
        cosine_similarity(&self.0, &other.0)
    }

    /// Squared Euclidean distance. Mismatched lengths return infinity so the
    /// vector never wins a nearest-neighbor comparison.
    pub fn distance_sq(&self, other: &EmbeddingVector) -> f64 {
        if self.0.len() != other.0.len() {
            return f64::INFINITY;
        }
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| {
                let d = *a as f64 - *b as f64;
                d * d
            })
            .sum()
    }

    /// Component-wise mean of a non-empty set of equal-length vectors.
    /// Returns `None` for an empty set or mismatched dimensions.
    pub fn mean_of(vectors: &[&EmbeddingVector]) -> Option<EmbeddingVector> {
        let first = vectors.first()?;
        let dims = first.dims();
        if vectors.iter().any(|v| v.dims() != dims) {
            return None;
        }
        let mut acc = vec![0.0f64; dims];
        for v in vectors {
            for (a, &x) in acc.iter_mut().zip(v.0.iter()) {
                *a += x as f64;
            }
        }
        let n = vectors.len() as f64;
        Some(EmbeddingVector(acc.into_iter().map(|a| (a / n) as f32).collect()))
    }
}

impl From<Vec<f32>> for EmbeddingVector {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

/// Cosine similarity between two raw slices.
/// Returns 0.0 for zero-length or zero-magnitude vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let (mut dot, mut mag_a, mut mag_b) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in a.iter().zip(b.iter()) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        mag_a += x * x;
        mag_b += y * y;
    }
    let denom = mag_a.sqrt() * mag_b.sqrt();
    if denom < f64::EPSILON {
        0.0
    } else {
        (dot / denom).clamp(-1.0, 1.0)
    }
}
