//! # taste-clustering
//!
//! Converts a user's positively-signaled watch history into a small set of
//! interest personas: seeded k-means over item embeddings, a bounded search
//! over k scored by mean silhouette, training-sample selection that protects
//! dormant interests from recency bias, and best-effort label carry-over
//! across clustering runs.

pub mod cancel;
pub mod kmeans;
pub mod manager;
pub mod quality;
pub mod sampling;

pub use cancel::CancelToken;
pub use manager::PersonaManager;
pub use sampling::{select_training_samples, TrainingSample};
