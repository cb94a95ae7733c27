//! # taste-core
//!
//! Foundation crate for the Taste recommendation engine.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod embedding;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::TasteConfig;
pub use embedding::EmbeddingVector;
pub use errors::{TasteError, TasteResult};
pub use models::{
    ActivityScore, CandidateItem, ChannelAffinity, Persona, PersonaSet, ScoreResult, Signal,
    SignalType,
};
