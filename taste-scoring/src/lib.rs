//! # taste-scoring
//!
//! Turns a candidate item plus the user's current persona snapshot and
//! channel-affinity table into a single orderable score. Pure functions
//! throughout: identical inputs always produce identical output.

pub mod curves;
pub mod scorer;

pub use scorer::VideoScorer;
