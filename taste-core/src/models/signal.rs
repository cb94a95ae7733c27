use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of user interaction with an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalType {
    Watched,
    Liked,
    Disliked,
    NotInterested,
}

impl SignalType {
    /// Positive signals feed persona clustering; negative ones only feed
    /// channel affinity and candidate filtering.
    pub fn is_positive(self) -> bool {
        matches!(self, SignalType::Watched | SignalType::Liked)
    }
}

/// An immutable, append-only record of a user interaction with an item.
///
/// `channel_id` identifies the source channel of the item, which doubles as
/// the key for channel-affinity tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    pub user_id: String,
    pub item_id: String,
    pub signal_type: SignalType,
    pub channel_id: String,
    pub timestamp: DateTime<Utc>,
}

impl Signal {
    pub fn new(
        user_id: impl Into<String>,
        item_id: impl Into<String>,
        signal_type: SignalType,
        channel_id: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            item_id: item_id.into(),
            signal_type,
            channel_id: channel_id.into(),
            timestamp,
        }
    }
}
