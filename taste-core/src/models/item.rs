use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::embedding::EmbeddingVector;

/// A candidate item to be scored. Transient input — fetched from external
/// metadata/embedding services, never owned or mutated by the core.
///
/// `embedding` is optional: an upstream embedding failure must not prevent
/// the item from receiving a metadata-only score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateItem {
    pub item_id: String,
    pub embedding: Option<EmbeddingVector>,
    pub channel_id: String,
    pub view_count: u64,
    pub upload_timestamp: DateTime<Utc>,
}

impl CandidateItem {
    pub fn new(
        item_id: impl Into<String>,
        embedding: Option<EmbeddingVector>,
        channel_id: impl Into<String>,
        view_count: u64,
        upload_timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            embedding,
            channel_id: channel_id.into(),
            view_count,
            upload_timestamp,
        }
    }
}
