/// Persona-clustering errors.
///
/// Both data-shaped failures are recoverable by callers: `InsufficientData`
/// falls back to non-personalized ranking, `Degenerate` collapses to a
/// single persona.
#[derive(Debug, thiserror::Error)]
pub enum ClusteringError {
    #[error("insufficient data: need {required} signaled items, have {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("degenerate input: {reason}")]
    Degenerate { reason: String },

    #[error("clustering run cancelled")]
    Cancelled,
}
