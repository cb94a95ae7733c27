use serde::{Deserialize, Serialize};

use super::defaults;

/// Activity-decay configuration, per user tunable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    /// Days for the activity score to fall halfway toward the floor.
    pub half_life_days: f64,
    /// Asymptotic lower bound — dormant interests never decay below this,
    /// so they can always resurface.
    pub activity_floor: f64,
    /// Activity added when a new signal matches a persona.
    pub boost_increment: f64,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            half_life_days: defaults::DEFAULT_HALF_LIFE_DAYS,
            activity_floor: defaults::DEFAULT_ACTIVITY_FLOOR,
            boost_increment: defaults::DEFAULT_BOOST_INCREMENT,
        }
    }
}
