use crate::embedding::EmbeddingVector;
use crate::errors::TasteResult;

/// Embedding generation provider — an external service boundary.
///
/// The core never generates embeddings itself; it consumes vectors of a
/// fixed dimensionality produced elsewhere.
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed a single text, returning a fixed-dimensional vector.
    fn embed(&self, text: &str) -> TasteResult<EmbeddingVector>;

    /// Embed a batch of texts.
    fn embed_batch(&self, texts: &[String]) -> TasteResult<Vec<EmbeddingVector>>;

    /// The dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;

    /// Human-readable provider name.
    fn name(&self) -> &str;
}
