use serde::{Deserialize, Serialize};

use crate::domain::{AnswerSource, ChatTurn};

const DEFAULT_HISTORY_LIMIT: usize = 20;
const MAX_HISTORY_LIMIT: usize = 200;

#[derive(Debug, Clone, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchAskRequest {
    pub questions: Vec<String>,
}

/// A `ChatTurn` echoed with the question that produced it
#[derive(Debug, Clone, Serialize)]
pub struct ChatAnswer {
    pub question: String,
    pub answer: String,
    pub source: AnswerSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl ChatAnswer {
    pub fn new(question: impl Into<String>, turn: ChatTurn) -> Self {
        Self {
            question: question.into(),
            answer: turn.answer,
            source: turn.source,
            confidence: turn.confidence,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

impl HistoryQuery {
    /// Requested limit, defaulted and capped
    pub fn limit(&self) -> usize {
        self.limit
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
            .min(MAX_HISTORY_LIMIT)
    }
}
