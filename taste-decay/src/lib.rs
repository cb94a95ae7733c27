//! # taste-decay
//!
//! Time-decay of persona activity: exponential decay toward a floor, applied
//! lazily at read time. Dormant interests fade but never vanish, so they can
//! resurface when matching signals return.

pub mod engine;
pub mod formula;

pub use engine::DecayEngine;
