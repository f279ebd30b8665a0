//! Question service - seeding and browsing the stored corpus

use std::sync::Arc;

use tracing::info;

use super::embed_text;
use crate::domain::{
    CachedQuestion, DomainError, EmbeddingProvider, QuestionId, QuestionRepository,
};

#[derive(Debug)]
pub struct QuestionService {
    embeddings: Arc<dyn EmbeddingProvider>,
    questions: Arc<dyn QuestionRepository>,
}

impl QuestionService {
    pub fn new(
        embeddings: Arc<dyn EmbeddingProvider>,
        questions: Arc<dyn QuestionRepository>,
    ) -> Self {
        Self {
            embeddings,
            questions,
        }
    }

    /// Embed and persist a known question/answer pair
    pub async fn add_question(
        &self,
        question: &str,
        answer: &str,
    ) -> Result<CachedQuestion, DomainError> {
        let question = question.trim();
        let answer = answer.trim();

        if question.is_empty() {
            return Err(DomainError::validation("Question must not be empty"));
        }
        if answer.is_empty() {
            return Err(DomainError::validation("Answer must not be empty"));
        }

        let embedding = embed_text(self.embeddings.as_ref(), question).await?;

        let stored = self.questions.create(question, answer, embedding).await?;
        info!(question_id = %stored.id(), "Question added");

        Ok(stored)
    }

    pub async fn list_questions(&self) -> Result<Vec<CachedQuestion>, DomainError> {
        self.questions.find_all().await
    }

    pub async fn get_question(&self, id: &str) -> Result<CachedQuestion, DomainError> {
        self.questions
            .find_by_id(&QuestionId::from(id))
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Question '{}' not found", id)))
    }

    pub async fn find_by_text(&self, text: &str) -> Result<Option<CachedQuestion>, DomainError> {
        self.questions.find_by_text(text.trim()).await
    }

    pub async fn count(&self) -> Result<usize, DomainError> {
        self.questions.count().await
    }
}
