//! Per-subsystem error enums plus the `TasteError` umbrella.

pub mod clustering_error;
pub mod config_error;
pub mod persona_error;

pub use clustering_error::ClusteringError;
pub use config_error::ConfigError;
pub use persona_error::PersonaError;

/// Umbrella error for the whole engine.
#[derive(Debug, thiserror::Error)]
pub enum TasteError {
    #[error(transparent)]
    Clustering(#[from] ClusteringError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Persona(#[from] PersonaError),
}

/// Result alias used across the workspace.
pub type TasteResult<T> = Result<T, TasteError>;

impl TasteError {
    /// Whether the caller can recover with a fallback ranking instead of
    /// surfacing a failure — a worse ranking beats no ranking.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            TasteError::Clustering(
                ClusteringError::InsufficientData { .. } | ClusteringError::Degenerate { .. }
            )
        )
    }
}
