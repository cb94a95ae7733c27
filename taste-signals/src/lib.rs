//! # taste-signals
//!
//! Durable, append-only log of user engagement signals. Signals are never
//! mutated after the fact; exact duplicates are rejected at this boundary so
//! downstream consumers can assume each interaction is counted once.

pub mod store;

pub use store::SignalStore;
