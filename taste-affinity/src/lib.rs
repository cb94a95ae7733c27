//! # taste-affinity
//!
//! Cheap, incrementally-updated per-(user, channel) multipliers reflecting
//! how much a user favors a content source, independent of any single item's
//! content. An explicit linear model over counters — auditable, not learned.

pub mod tracker;

pub use tracker::ChannelAffinityTracker;
