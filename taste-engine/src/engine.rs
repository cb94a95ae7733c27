//! TasteEngine: the single entry point callers hold.
//!
//! Persona sets are published copy-on-write: every mutation builds a fresh
//! `PersonaSet` and swaps it in with one `DashMap` insert, so a scoring
//! call that cloned the `Arc` a moment earlier keeps ranking against a
//! consistent snapshot for its whole batch.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::{debug, info, warn};

use taste_affinity::ChannelAffinityTracker;
use taste_clustering::{select_training_samples, CancelToken, PersonaManager, TrainingSample};
use taste_core::config::TasteConfig;
use taste_core::constants::MAX_SCORING_BATCH_SIZE;
use taste_core::errors::{ClusteringError, PersonaError};
use taste_core::models::{CandidateItem, PersonaSet, ScoreResult, Signal};
use taste_core::{EmbeddingVector, TasteResult};
use taste_decay::DecayEngine;
use taste_scoring::VideoScorer;
use taste_signals::SignalStore;

/// Orchestrates signal intake, persona refreshes, snapshot publication and
/// candidate scoring. All methods take `&self`; internal state is sharded
/// concurrent maps, so one engine instance serves all threads.
pub struct TasteEngine {
    config: TasteConfig,
    signals: SignalStore,
    affinity: ChannelAffinityTracker,
    manager: PersonaManager,
    scorer: VideoScorer,
    /// Item-id → embedding, populated as signals arrive. Embeddings are
    /// produced upstream; the engine only caches what it has been handed.
    embeddings: DashMap<String, EmbeddingVector>,
    /// Published persona snapshots, one per user.
    snapshots: DashMap<String, Arc<PersonaSet>>,
}

impl TasteEngine {
    /// Build an engine from a validated configuration.
    pub fn new(config: TasteConfig) -> TasteResult<Self> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: TasteConfig) -> Self {
        let manager = PersonaManager::new(
            config.clustering.clone(),
            DecayEngine::new(config.decay.clone()),
        );
        let scorer = VideoScorer::new(
            config.scoring.clone(),
            config.affinity.clone(),
            DecayEngine::new(config.decay.clone()),
        );
        let affinity = ChannelAffinityTracker::new(config.affinity.clone());
        Self {
            config,
            signals: SignalStore::new(),
            affinity,
            manager,
            scorer,
            embeddings: DashMap::new(),
            snapshots: DashMap::new(),
        }
    }

    pub fn config(&self) -> &TasteConfig {
        &self.config
    }

    /// Ingest one signal, with the item's embedding when the caller has it.
    ///
    /// Returns `false` for an exact duplicate, in which case nothing
    /// downstream moves either. Otherwise the channel affinity updates, and
    /// a positive signal on a user with a published snapshot also nudges the
    /// nearest persona's activity and republishes (no reclustering).
    pub fn record_signal(&self, signal: Signal, embedding: Option<EmbeddingVector>) -> bool {
        if let Some(embedding) = embedding {
            self.embeddings.insert(signal.item_id.clone(), embedding);
        }
        if !self.signals.record(signal.clone()) {
            return false;
        }

        self.affinity.record_signal(
            &signal.user_id,
            &signal.channel_id,
            signal.signal_type,
            signal.timestamp,
        );

        if signal.signal_type.is_positive() {
            self.boost_nearest_persona(&signal);
        }
        true
    }

    fn boost_nearest_persona(&self, signal: &Signal) {
        let current = match self.snapshots.get(&signal.user_id) {
            Some(entry) => Arc::clone(entry.value()),
            None => return,
        };
        let embedding = match self.embeddings.get(&signal.item_id) {
            Some(entry) => entry.value().clone(),
            None => {
                debug!(
                    user_id = %signal.user_id,
                    item_id = %signal.item_id,
                    "no embedding cached, skipping activity boost"
                );
                return;
            }
        };
        if let Some(updated) = self
            .manager
            .update_activity(&current, &embedding, signal.timestamp)
        {
            self.publish(updated);
        }
    }

    /// Run a full persona refresh for a user. See
    /// [`refresh_personas_cancellable`](Self::refresh_personas_cancellable).
    pub fn refresh_personas(
        &self,
        user_id: &str,
        k_override: Option<usize>,
        now: DateTime<Utc>,
    ) -> TasteResult<Arc<PersonaSet>> {
        self.refresh_personas_cancellable(user_id, k_override, now, &CancelToken::new())
    }

    /// Run a full persona refresh, observing `cancel`.
    ///
    /// The run happens entirely out-of-band: scoring keeps serving the old
    /// snapshot until the new set is published in one atomic insert. On
    /// `InsufficientData` the error propagates and the published snapshot —
    /// if any — is left untouched; a degenerate (too-homogeneous) history
    /// collapses to a single full-activity persona instead of failing.
    pub fn refresh_personas_cancellable(
        &self,
        user_id: &str,
        k_override: Option<usize>,
        now: DateTime<Utc>,
        cancel: &CancelToken,
    ) -> TasteResult<Arc<PersonaSet>> {
        let gathered = self.training_samples_for(user_id);
        let selected = select_training_samples(gathered, &self.config.clustering, now);
        debug!(user_id, selected = selected.len(), "training set selected");

        let previous = self.snapshots.get(user_id).map(|e| Arc::clone(e.value()));
        let previous_ref = previous.as_deref();

        match self
            .manager
            .refresh(user_id, &selected, previous_ref, k_override, now, cancel)
        {
            Ok(set) => Ok(self.publish(set)),
            Err(ClusteringError::Degenerate { reason }) => {
                info!(user_id, %reason, "homogeneous history, collapsing to one persona");
                let set = self
                    .manager
                    .single_persona_set(user_id, &selected, previous_ref, now);
                Ok(self.publish(set))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Score a candidate batch for a user against the current snapshot.
    /// Every supplied candidate receives a result.
    ///
    /// The snapshot `Arc` and the affinity table are both captured once, up
    /// front: a concurrent refresh or signal cannot change this batch's
    /// inputs midway. A user with no published set gets the fallback
    /// content score on every item — still a fully ordered list.
    pub fn score_candidates(
        &self,
        user_id: &str,
        candidates: &[CandidateItem],
        now: DateTime<Utc>,
    ) -> Vec<ScoreResult> {
        let snapshot = self
            .snapshots
            .get(user_id)
            .map(|e| Arc::clone(e.value()))
            .unwrap_or_else(|| Arc::new(PersonaSet::empty(user_id, now)));
        let table: HashMap<String, f64> = self.affinity.user_table(user_id);

        if candidates.len() > MAX_SCORING_BATCH_SIZE {
            warn!(
                user_id,
                batch = candidates.len(),
                cap = MAX_SCORING_BATCH_SIZE,
                "scoring batch exceeds the advisory cap"
            );
        }

        debug!(
            user_id,
            batch = candidates.len(),
            personas = snapshot.len(),
            version = snapshot.version,
            "scoring batch"
        );
        self.scorer.score_batch(candidates, &snapshot, &table, now)
    }

    /// The user's published persona snapshot, if one exists.
    pub fn get_personas(&self, user_id: &str) -> Option<Arc<PersonaSet>> {
        self.snapshots.get(user_id).map(|e| Arc::clone(e.value()))
    }

    /// Attach (or clear) a label on one persona, republishing the snapshot.
    pub fn set_persona_label(
        &self,
        user_id: &str,
        persona_index: usize,
        label: Option<String>,
    ) -> TasteResult<Arc<PersonaSet>> {
        let current = self
            .snapshots
            .get(user_id)
            .map(|e| Arc::clone(e.value()))
            .ok_or_else(|| PersonaError::NoPersonaSet {
                user_id: user_id.to_string(),
            })?;
        let updated = current
            .with_label(persona_index, label)
            .ok_or(PersonaError::UnknownPersonaIndex {
                index: persona_index,
                count: current.len(),
            })?;
        Ok(self.publish(updated))
    }

    /// Direct read access to the signal log.
    pub fn signals(&self) -> &SignalStore {
        &self.signals
    }

    /// Direct read access to the affinity tracker.
    pub fn affinity(&self) -> &ChannelAffinityTracker {
        &self.affinity
    }

    fn publish(&self, set: PersonaSet) -> Arc<PersonaSet> {
        info!(
            user_id = %set.user_id,
            version = set.version,
            revision = set.revision,
            k = set.k,
            "publishing persona snapshot"
        );
        let arc = Arc::new(set);
        self.snapshots
            .insert(arc.user_id.clone(), Arc::clone(&arc));
        arc
    }

    /// Positively-signaled items with a cached embedding, one sample per
    /// item at its newest signal timestamp.
    fn training_samples_for(&self, user_id: &str) -> Vec<TrainingSample> {
        let mut newest: HashMap<String, DateTime<Utc>> = HashMap::new();
        for signal in self.signals.positive_signals_for(user_id) {
            newest
                .entry(signal.item_id)
                .and_modify(|ts| {
                    if signal.timestamp > *ts {
                        *ts = signal.timestamp;
                    }
                })
                .or_insert(signal.timestamp);
        }

        let mut skipped = 0usize;
        let mut samples: Vec<TrainingSample> = newest
            .into_iter()
            .filter_map(|(item_id, timestamp)| {
                match self.embeddings.get(&item_id) {
                    Some(entry) => {
                        Some(TrainingSample::new(item_id, entry.value().clone(), timestamp))
                    }
                    None => {
                        skipped += 1;
                        None
                    }
                }
            })
            .collect();
        if skipped > 0 {
            debug!(user_id, skipped, "items without embeddings excluded from training");
        }
        // HashMap iteration order is not stable; sort so the downstream
        // seeded sampling sees the same input every run.
        samples.sort_by(|a, b| a.item_id.cmp(&b.item_id));
        samples
    }
}

impl Default for TasteEngine {
    fn default() -> Self {
        Self::from_config(TasteConfig::default())
    }
}
