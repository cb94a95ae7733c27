//! # taste-engine
//!
//! The orchestrating facade over the Taste workspace. Owns the signal log,
//! the channel-affinity tracker, the persona manager and the scorer, and
//! publishes persona sets as immutable snapshots: readers hold an
//! `Arc<PersonaSet>` that never changes underneath them, and a refresh
//! becomes visible in a single map insert.

pub mod engine;

pub use engine::TasteEngine;
pub use taste_clustering::CancelToken;
