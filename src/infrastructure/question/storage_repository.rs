//! Storage-backed question repository

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::question::{CachedQuestion, QuestionId, QuestionRepository};
use crate::domain::storage::Storage;
use crate::domain::DomainError;

pub const QUESTIONS_TABLE: &str = "cached_questions";

#[derive(Debug)]
pub struct StorageQuestionRepository {
    storage: Arc<dyn Storage<CachedQuestion>>,
}

impl StorageQuestionRepository {
    pub fn new(storage: Arc<dyn Storage<CachedQuestion>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl QuestionRepository for StorageQuestionRepository {
    async fn create(
        &self,
        question: &str,
        answer: &str,
        embedding: Vec<f32>,
    ) -> Result<CachedQuestion, DomainError> {
        self.storage
            .create(CachedQuestion::new(question, answer, embedding))
            .await
    }

    async fn find_all(&self) -> Result<Vec<CachedQuestion>, DomainError> {
        self.storage.list().await
    }

    async fn find_by_id(&self, id: &QuestionId) -> Result<Option<CachedQuestion>, DomainError> {
        self.storage.get(id).await
    }

    async fn find_by_text(&self, question: &str) -> Result<Option<CachedQuestion>, DomainError> {
        Ok(self
            .storage
            .list()
            .await?
            .into_iter()
            .find(|q| q.question() == question))
    }

    async fn count(&self) -> Result<usize, DomainError> {
        self.storage.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryStorage;

    fn repository() -> StorageQuestionRepository {
        StorageQuestionRepository::new(Arc::new(InMemoryStorage::<CachedQuestion>::new()))
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_keeps_embedding() {
        let repo = repository();

        let created = repo
            .create("What is 2+2?", "4", vec![0.1, 0.2])
            .await
            .unwrap();

        assert!(!created.id().as_str().is_empty());
        let found = repo.find_by_id(created.id()).await.unwrap().unwrap();
        assert_eq!(found.embedding(), &[0.1, 0.2]);
        assert_eq!(found.answer(), "4");
    }

    #[tokio::test]
    async fn test_find_all_in_insertion_order() {
        let repo = repository();
        for text in ["one", "two", "three"] {
            repo.create(text, text, vec![1.0]).await.unwrap();
        }

        let texts: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .iter()
            .map(|q| q.question().to_string())
            .collect();

        assert_eq!(texts, vec!["one", "two", "three"]);
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_find_by_text_is_exact() {
        let repo = repository();
        repo.create("What is Rust?", "A language", vec![1.0])
            .await
            .unwrap();

        assert!(repo.find_by_text("What is Rust?").await.unwrap().is_some());
        assert!(repo.find_by_text("what is rust?").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_text_is_allowed() {
        let repo = repository();

        repo.create("same", "a", vec![1.0]).await.unwrap();
        repo.create("same", "b", vec![1.0]).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 2);
        assert_eq!(repo.find_by_text("same").await.unwrap().unwrap().answer(), "a");
    }
}
