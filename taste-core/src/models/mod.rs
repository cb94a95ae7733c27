//! Data model for the recommendation core: signals, candidate items,
//! personas, channel affinities, and score breakdowns.

pub mod activity;
pub mod affinity;
pub mod item;
pub mod persona;
pub mod score;
pub mod signal;

pub use activity::ActivityScore;
pub use affinity::ChannelAffinity;
pub use item::CandidateItem;
pub use persona::{Persona, PersonaSet};
pub use score::ScoreResult;
pub use signal::{Signal, SignalType};
