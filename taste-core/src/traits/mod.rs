//! Traits at the external service seams.

pub mod candidates;
pub mod embedding;

pub use candidates::ICandidateSource;
pub use embedding::IEmbeddingProvider;
