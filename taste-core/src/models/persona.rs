//! Personas and immutable persona-set snapshots.
//!
//! A `PersonaSet` is replaced wholesale by each clustering run; readers hold
//! a snapshot and are never exposed to a half-updated cluster set. Lightweight
//! updates (activity boosts, labels) produce a new set with a bumped
//! `revision`, leaving `version` to identify the clustering run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::embedding::EmbeddingVector;
use crate::models::activity::ActivityScore;

/// A learned interest cluster: centroid embedding plus a decaying
/// activity score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    pub user_id: String,
    /// Index of this persona within its set. Stable only within one
    /// clustering run.
    pub persona_index: usize,
    pub centroid: EmbeddingVector,
    pub activity_score: ActivityScore,
    pub last_activity_timestamp: DateTime<Utc>,
    /// Number of training items assigned to this cluster.
    pub member_count: usize,
    /// A few representative member item ids, for display and debugging.
    pub sample_item_ids: Vec<String>,
    /// Human-assigned label. Carried across refreshes on a best-effort
    /// nearest-centroid basis; cleared when no new cluster matches.
    pub label: Option<String>,
}

/// An immutable, versioned snapshot of all of a user's personas plus the
/// clustering parameters that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaSet {
    pub user_id: String,
    /// Increments once per clustering run.
    pub version: u64,
    /// Increments on lightweight updates (boosts, labels) within a version.
    pub revision: u64,
    pub personas: Vec<Persona>,
    /// The k the clustering run settled on.
    pub k: usize,
    /// Mean silhouette score of the winning clustering.
    pub silhouette_score: f64,
    /// Set when no candidate k cleared the quality threshold.
    pub quality_low: bool,
    pub training_sample_count: usize,
    pub created_at: DateTime<Utc>,
}

impl PersonaSet {
    /// An empty set for a user with no clustering history.
    pub fn empty(user_id: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.into(),
            version: 0,
            revision: 0,
            personas: Vec::new(),
            k: 0,
            silhouette_score: 0.0,
            quality_low: false,
            training_sample_count: 0,
            created_at,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    /// Nearest persona to `embedding` by cosine similarity, with the
    /// similarity value. `None` when the set is empty.
    pub fn nearest_persona(&self, embedding: &EmbeddingVector) -> Option<(usize, f64)> {
        self.personas
            .iter()
            .map(|p| p.centroid.cosine_similarity(embedding))
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    }

    /// New snapshot with one persona's label replaced.
    /// `None` when the index is out of range.
    pub fn with_label(&self, persona_index: usize, label: Option<String>) -> Option<PersonaSet> {
        if persona_index >= self.personas.len() {
            return None;
        }
        let mut next = self.clone();
        next.personas[persona_index].label = label;
        next.revision += 1;
        Some(next)
    }

    /// New snapshot with one persona's activity boosted toward 1.0 and its
    /// last-activity timestamp advanced. Other personas are untouched.
    /// `None` when the index is out of range.
    pub fn with_activity_boost(
        &self,
        persona_index: usize,
        increment: f64,
        timestamp: DateTime<Utc>,
    ) -> Option<PersonaSet> {
        if persona_index >= self.personas.len() {
            return None;
        }
        let mut next = self.clone();
        let p = &mut next.personas[persona_index];
        p.activity_score = p.activity_score.boosted(increment);
        // Never move activity backwards in time.
        if timestamp > p.last_activity_timestamp {
            p.last_activity_timestamp = timestamp;
        }
        next.revision += 1;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn persona(user: &str, index: usize, centroid: Vec<f32>) -> Persona {
        Persona {
            user_id: user.to_string(),
            persona_index: index,
            centroid: EmbeddingVector::new(centroid),
            activity_score: ActivityScore::new(0.5),
            last_activity_timestamp: Utc::now(),
            member_count: 10,
            sample_item_ids: vec![],
            label: None,
        }
    }

    fn two_persona_set() -> PersonaSet {
        PersonaSet {
            user_id: "u1".into(),
            version: 1,
            revision: 0,
            personas: vec![
                persona("u1", 0, vec![1.0, 0.0]),
                persona("u1", 1, vec![0.0, 1.0]),
            ],
            k: 2,
            silhouette_score: 0.8,
            quality_low: false,
            training_sample_count: 40,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn nearest_persona_picks_highest_similarity() {
        let set = two_persona_set();
        let (idx, sim) = set
            .nearest_persona(&EmbeddingVector::new(vec![0.1, 0.9]))
            .unwrap();
        assert_eq!(idx, 1);
        assert!(sim > 0.9, "similarity {}", sim);
    }

    #[test]
    fn nearest_persona_on_empty_set_is_none() {
        let set = PersonaSet::empty("u1", Utc::now());
        assert!(set.nearest_persona(&EmbeddingVector::new(vec![1.0])).is_none());
    }

    #[test]
    fn with_label_bumps_revision_and_leaves_original_untouched() {
        let set = two_persona_set();
        let labeled = set.with_label(0, Some("cooking".into())).unwrap();
        assert_eq!(labeled.revision, 1);
        assert_eq!(labeled.personas[0].label.as_deref(), Some("cooking"));
        assert!(set.personas[0].label.is_none());
    }

    #[test]
    fn with_label_out_of_range_is_none() {
        assert!(two_persona_set().with_label(5, None).is_none());
    }

    #[test]
    fn boost_saturates_and_advances_timestamp() {
        let set = two_persona_set();
        let later = set.personas[0].last_activity_timestamp + chrono::Duration::days(1);
        let boosted = set.with_activity_boost(0, 0.9, later).unwrap();
        assert_eq!(boosted.personas[0].activity_score.value(), 1.0);
        assert_eq!(boosted.personas[0].last_activity_timestamp, later);
        // Other persona untouched.
        assert_eq!(boosted.personas[1], set.personas[1]);
    }

    #[test]
    fn boost_never_moves_timestamp_backwards() {
        let set = two_persona_set();
        let earlier = set.personas[0].last_activity_timestamp - chrono::Duration::days(7);
        let boosted = set.with_activity_boost(0, 0.1, earlier).unwrap();
        assert_eq!(
            boosted.personas[0].last_activity_timestamp,
            set.personas[0].last_activity_timestamp
        );
    }
}
