use crate::errors::TasteResult;
use crate::models::CandidateItem;

/// Candidate supply — an external metadata/embedding service boundary.
pub trait ICandidateSource: Send + Sync {
    /// Fetch a single candidate by id.
    fn candidate(&self, item_id: &str) -> TasteResult<Option<CandidateItem>>;

    /// Fetch a batch of candidates. Missing items are skipped, not errors.
    fn candidates(&self, item_ids: &[String]) -> TasteResult<Vec<CandidateItem>>;
}
