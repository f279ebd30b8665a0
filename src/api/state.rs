//! Shared handler state

use std::sync::Arc;

use crate::domain::ChatHistoryRepository;
use crate::infrastructure::services::{QuestionService, SemanticQaService};

#[derive(Clone, Debug)]
pub struct AppState {
    pub qa_service: Arc<SemanticQaService>,
    pub question_service: Arc<QuestionService>,
    pub history: Arc<dyn ChatHistoryRepository>,
}

impl AppState {
    pub fn new(
        qa_service: Arc<SemanticQaService>,
        question_service: Arc<QuestionService>,
        history: Arc<dyn ChatHistoryRepository>,
    ) -> Self {
        Self {
            qa_service,
            question_service,
            history,
        }
    }
}
