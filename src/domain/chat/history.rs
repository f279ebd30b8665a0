//! Chat history entries and their repository

use std::fmt::Debug;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AnswerSource, ChatTurn};
use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatHistoryId(String);

impl ChatHistoryId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl StorageKey for ChatHistoryId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Record of one answered question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatHistoryEntry {
    pub id: ChatHistoryId,
    pub question: String,
    pub answer: String,
    pub source: AnswerSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    pub created_at: DateTime<Utc>,
}

impl ChatHistoryEntry {
    pub fn from_turn(question: impl Into<String>, turn: &ChatTurn) -> Self {
        Self {
            id: ChatHistoryId::generate(),
            question: question.into(),
            answer: turn.answer.clone(),
            source: turn.source,
            confidence: turn.confidence,
            created_at: Utc::now(),
        }
    }
}

impl StorageEntity for ChatHistoryEntry {
    type Key = ChatHistoryId;

    fn key(&self) -> &Self::Key {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Append-only log of chat turns
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ChatHistoryRepository: Send + Sync + Debug {
    async fn create(&self, entry: ChatHistoryEntry) -> Result<ChatHistoryEntry, DomainError>;

    /// Most recent entries first, at most `limit`
    async fn find_recent(&self, limit: usize) -> Result<Vec<ChatHistoryEntry>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_from_turn() {
        let entry = ChatHistoryEntry::from_turn("What is 2+2?", &ChatTurn::cached("4", 0.97));

        assert_eq!(entry.question, "What is 2+2?");
        assert_eq!(entry.answer, "4");
        assert_eq!(entry.source, AnswerSource::Cache);
        assert_eq!(entry.confidence, Some(0.97));
        assert!(!entry.key().as_str().is_empty());
    }

    #[tokio::test]
    async fn test_automock_history_repository() {
        let mut repo = MockChatHistoryRepository::new();
        repo.expect_find_recent()
            .withf(|limit| *limit == 5)
            .times(1)
            .returning(|_| Ok(vec![]));

        assert!(repo.find_recent(5).await.unwrap().is_empty());
    }
}
