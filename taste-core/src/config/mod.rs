//! Configuration for every subsystem, loadable from TOML.
//!
//! All structs deserialize with `#[serde(default)]` so a partial config file
//! only overrides what it names; `defaults` is the single source of truth
//! for the shipped values.

pub mod affinity_config;
pub mod clustering_config;
pub mod decay_config;
pub mod defaults;
pub mod scoring_config;

use serde::{Deserialize, Serialize};

pub use affinity_config::AffinityConfig;
pub use clustering_config::ClusteringConfig;
pub use decay_config::DecayConfig;
pub use scoring_config::ScoringConfig;

use crate::errors::{ConfigError, TasteResult};

/// Top-level configuration for the Taste engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TasteConfig {
    pub decay: DecayConfig,
    pub clustering: ClusteringConfig,
    pub scoring: ScoringConfig,
    pub affinity: AffinityConfig,
}

impl TasteConfig {
    /// Parse a TOML document, falling back to defaults for missing keys.
    pub fn from_toml_str(input: &str) -> TasteResult<Self> {
        let config: TasteConfig =
            toml::from_str(input).map_err(|e| ConfigError::ParseFailed {
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would make the scoring math meaningless.
    pub fn validate(&self) -> TasteResult<()> {
        if !(0.0..1.0).contains(&self.decay.activity_floor) {
            return Err(ConfigError::InvalidValue {
                field: "decay.activity_floor".into(),
                reason: format!("must be in [0, 1), got {}", self.decay.activity_floor),
            }
            .into());
        }
        if self.decay.half_life_days <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "decay.half_life_days".into(),
                reason: format!("must be positive, got {}", self.decay.half_life_days),
            }
            .into());
        }
        if self.clustering.k_min == 0 || self.clustering.k_min > self.clustering.k_max {
            return Err(ConfigError::InvalidValue {
                field: "clustering.k_min".into(),
                reason: format!(
                    "need 0 < k_min <= k_max, got {}..{}",
                    self.clustering.k_min, self.clustering.k_max
                ),
            }
            .into());
        }
        if self.scoring.view_sweet_spot_low > self.scoring.view_sweet_spot_high {
            return Err(ConfigError::InvalidValue {
                field: "scoring.view_sweet_spot_low".into(),
                reason: "sweet spot low bound exceeds high bound".into(),
            }
            .into());
        }
        if self.affinity.min_score > self.affinity.max_score {
            return Err(ConfigError::InvalidValue {
                field: "affinity.min_score".into(),
                reason: "affinity clamp band is inverted".into(),
            }
            .into());
        }
        Ok(())
    }
}
