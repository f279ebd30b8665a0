//! A single answered question and where its answer came from

use serde::{Deserialize, Serialize};

/// Where an answer came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerSource {
    /// Served from (or adapted from) a stored question
    Cache,
    /// Freshly produced by the answer generator
    Generated,
}

impl AnswerSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cache => "cache",
            Self::Generated => "generated",
        }
    }
}

impl std::fmt::Display for AnswerSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The engine's answer to one question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub answer: String,
    pub source: AnswerSource,
    /// Similarity of the matched question; only set for cache answers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl ChatTurn {
    pub fn cached(answer: impl Into<String>, similarity: f32) -> Self {
        Self {
            answer: answer.into(),
            source: AnswerSource::Cache,
            confidence: Some(similarity),
        }
    }

    pub fn generated(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            source: AnswerSource::Generated,
            confidence: None,
        }
    }

    pub fn is_cached(&self) -> bool {
        self.source == AnswerSource::Cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_turn_omits_confidence() {
        let json = serde_json::to_value(ChatTurn::generated("42")).unwrap();

        assert_eq!(json["answer"], "42");
        assert_eq!(json["source"], "generated");
        assert!(json.get("confidence").is_none());
    }

    #[test]
    fn test_cached_turn_carries_confidence() {
        let turn = ChatTurn::cached("42", 0.93);
        let json = serde_json::to_value(&turn).unwrap();

        assert!(turn.is_cached());
        assert_eq!(json["source"], "cache");
        assert!((json["confidence"].as_f64().unwrap() - 0.93).abs() < 1e-6);
    }
}
