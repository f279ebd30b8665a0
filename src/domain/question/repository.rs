//! Question store trait

use std::fmt::Debug;

use async_trait::async_trait;

use super::{CachedQuestion, QuestionId};
use crate::domain::DomainError;

/// Append-only store of question/answer/embedding triples
#[async_trait]
pub trait QuestionRepository: Send + Sync + Debug {
    /// Persist a new question with its answer and embedding
    async fn create(
        &self,
        question: &str,
        answer: &str,
        embedding: Vec<f32>,
    ) -> Result<CachedQuestion, DomainError>;

    /// All stored questions, in a stable insertion order
    async fn find_all(&self) -> Result<Vec<CachedQuestion>, DomainError>;

    async fn find_by_id(&self, id: &QuestionId) -> Result<Option<CachedQuestion>, DomainError>;

    /// Exact text match
    async fn find_by_text(&self, question: &str) -> Result<Option<CachedQuestion>, DomainError>;

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.find_all().await?.len())
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// Vec-backed QuestionRepository for testing
    #[derive(Debug, Default)]
    pub struct MockQuestionRepository {
        questions: Mutex<Vec<CachedQuestion>>,
        error: Mutex<Option<String>>,
        create_error: Mutex<Option<String>>,
    }

    impl MockQuestionRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_question(self, question: CachedQuestion) -> Self {
            self.questions.lock().unwrap().push(question);
            self
        }

        /// Fail every operation
        pub fn with_error(self, error: impl Into<String>) -> Self {
            *self.error.lock().unwrap() = Some(error.into());
            self
        }

        /// Fail only writes
        pub fn with_create_error(self, error: impl Into<String>) -> Self {
            *self.create_error.lock().unwrap() = Some(error.into());
            self
        }

        pub fn stored(&self) -> Vec<CachedQuestion> {
            self.questions.lock().unwrap().clone()
        }

        fn check_error(&self) -> Result<(), DomainError> {
            if let Some(err) = self.error.lock().unwrap().as_ref() {
                return Err(DomainError::storage(err.clone()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl QuestionRepository for MockQuestionRepository {
        async fn create(
            &self,
            question: &str,
            answer: &str,
            embedding: Vec<f32>,
        ) -> Result<CachedQuestion, DomainError> {
            self.check_error()?;
            if let Some(err) = self.create_error.lock().unwrap().as_ref() {
                return Err(DomainError::storage(err.clone()));
            }

            let entry = CachedQuestion::new(question, answer, embedding);
            self.questions.lock().unwrap().push(entry.clone());
            Ok(entry)
        }

        async fn find_all(&self) -> Result<Vec<CachedQuestion>, DomainError> {
            self.check_error()?;
            Ok(self.questions.lock().unwrap().clone())
        }

        async fn find_by_id(
            &self,
            id: &QuestionId,
        ) -> Result<Option<CachedQuestion>, DomainError> {
            self.check_error()?;
            Ok(self
                .questions
                .lock()
                .unwrap()
                .iter()
                .find(|q| q.id() == id)
                .cloned())
        }

        async fn find_by_text(
            &self,
            question: &str,
        ) -> Result<Option<CachedQuestion>, DomainError> {
            self.check_error()?;
            Ok(self
                .questions
                .lock()
                .unwrap()
                .iter()
                .find(|q| q.question() == question)
                .cloned())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_keeps_insertion_order() {
            let repo = MockQuestionRepository::new();

            repo.create("first", "1", vec![1.0]).await.unwrap();
            repo.create("second", "2", vec![0.5]).await.unwrap();

            let all = repo.find_all().await.unwrap();
            assert_eq!(all[0].question(), "first");
            assert_eq!(all[1].question(), "second");
            assert_eq!(repo.count().await.unwrap(), 2);
        }

        #[tokio::test]
        async fn test_mock_error() {
            let repo = MockQuestionRepository::new().with_error("boom");

            assert!(repo.find_all().await.is_err());
            assert!(repo.count().await.is_err());
        }
    }
}
