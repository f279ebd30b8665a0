//! Similarity engine
//!
//! Cosine scoring, confidence tiering and the linear nearest-neighbour scan
//! over stored questions.

mod cosine;
mod search;
mod tier;

pub use cosine::cosine_similarity;
pub use search::{find_most_similar, SimilarityResult};
pub use tier::{ConfidenceThresholds, ConfidenceTier};
