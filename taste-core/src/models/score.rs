use serde::{Deserialize, Serialize};

/// Full scoring breakdown for one candidate item.
///
/// Every sub-factor is exposed, not just the final number, so rankings can
/// be debugged and test assertions can target individual factors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub item_id: String,
    /// `content_score × channel_boost × view_health × recency_factor`.
    pub final_score: f64,
    /// Best persona match weighted by decayed activity, in [0.0, 1.0];
    /// the configured fallback constant when no persona or embedding exists.
    pub content_score: f64,
    /// Index of the persona that produced `content_score`.
    /// `None` when the fallback constant was used.
    pub matching_persona_index: Option<usize>,
    pub channel_boost: f64,
    pub view_health: f64,
    pub recency_factor: f64,
    /// The candidate arrived without an embedding; callers may deprioritize
    /// or retry the item later.
    pub embedding_missing: bool,
    /// `content_score` is the cold-start fallback constant rather than a
    /// persona match (empty persona set or missing embedding).
    pub used_fallback: bool,
}
