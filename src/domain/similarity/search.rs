//! Best-match search over stored questions

use super::{cosine_similarity, ConfidenceThresholds, ConfidenceTier};
use crate::domain::question::CachedQuestion;
use crate::domain::DomainError;

/// The stored question closest to a query embedding
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityResult {
    pub matched_question: CachedQuestion,
    pub similarity: f32,
    pub confidence_tier: ConfidenceTier,
}

/// Find the candidate with the highest cosine similarity to `query`
///
/// Returns `None` when there are no candidates or when the best score is
/// below `thresholds.min_acceptance()`. Ties keep the earliest candidate.
/// A candidate whose embedding length differs from the query aborts the
/// search with `DimensionMismatch`.
pub fn find_most_similar(
    query: &[f32],
    candidates: &[CachedQuestion],
    thresholds: &ConfidenceThresholds,
) -> Result<Option<SimilarityResult>, DomainError> {
    let mut best: Option<(usize, f32)> = None;

    for (index, candidate) in candidates.iter().enumerate() {
        let similarity = cosine_similarity(query, candidate.embedding())?;

        match best {
            Some((_, best_similarity)) if similarity <= best_similarity => {}
            _ => best = Some((index, similarity)),
        }
    }

    let Some((index, similarity)) = best else {
        return Ok(None);
    };

    if similarity < thresholds.min_acceptance() {
        return Ok(None);
    }

    Ok(Some(SimilarityResult {
        matched_question: candidates[index].clone(),
        similarity,
        confidence_tier: thresholds.tier_for(similarity),
    }))
}
