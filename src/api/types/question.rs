use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{CachedQuestion, ConfidenceTier, SimilarityResult};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuestionRequest {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    pub question: String,
}

/// Stored question without its embedding
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub dimensions: usize,
    pub created_at: DateTime<Utc>,
}

impl From<&CachedQuestion> for QuestionView {
    fn from(question: &CachedQuestion) -> Self {
        Self {
            id: question.id().to_string(),
            question: question.question().to_string(),
            answer: question.answer().to_string(),
            dimensions: question.dimensions(),
            created_at: question.created_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub question: QuestionView,
    pub similarity: f32,
    pub confidence_tier: ConfidenceTier,
}

impl From<&SimilarityResult> for SearchResult {
    fn from(result: &SimilarityResult) -> Self {
        Self {
            question: QuestionView::from(&result.matched_question),
            similarity: result.similarity,
            confidence_tier: result.confidence_tier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_omits_embedding() {
        let question = CachedQuestion::new("q", "a", vec![0.1, 0.2, 0.3]).with_id("q-1");

        let json = serde_json::to_value(QuestionView::from(&question)).unwrap();

        assert_eq!(json["id"], "q-1");
        assert_eq!(json["dimensions"], 3);
        assert!(json.get("embedding").is_none());
    }
}
