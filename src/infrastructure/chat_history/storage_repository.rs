use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::chat::{ChatHistoryEntry, ChatHistoryRepository};
use crate::domain::storage::Storage;
use crate::domain::DomainError;

pub const CHAT_HISTORY_TABLE: &str = "chat_history";

#[derive(Debug)]
pub struct StorageChatHistoryRepository {
    storage: Arc<dyn Storage<ChatHistoryEntry>>,
}

impl StorageChatHistoryRepository {
    pub fn new(storage: Arc<dyn Storage<ChatHistoryEntry>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl ChatHistoryRepository for StorageChatHistoryRepository {
    async fn create(&self, entry: ChatHistoryEntry) -> Result<ChatHistoryEntry, DomainError> {
        self.storage.create(entry).await
    }

    async fn find_recent(&self, limit: usize) -> Result<Vec<ChatHistoryEntry>, DomainError> {
        let entries = self.storage.list().await?;
        Ok(entries.into_iter().rev().take(limit).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ChatTurn;
    use crate::infrastructure::storage::InMemoryStorage;

    fn history_repository() -> StorageChatHistoryRepository {
        StorageChatHistoryRepository::new(Arc::new(InMemoryStorage::<ChatHistoryEntry>::new()))
    }

    #[tokio::test]
    async fn test_find_recent_newest_first() {
        let repo = history_repository();

        for question in ["first", "second", "third"] {
            repo.create(ChatHistoryEntry::from_turn(question, &ChatTurn::generated("x")))
                .await
                .unwrap();
        }

        let recent = repo.find_recent(2).await.unwrap();

        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].question, "third");
        assert_eq!(recent[1].question, "second");
    }

    #[tokio::test]
    async fn test_find_recent_zero_limit() {
        let repo = history_repository();
        repo.create(ChatHistoryEntry::from_turn("q", &ChatTurn::generated("a")))
            .await
            .unwrap();

        assert!(repo.find_recent(0).await.unwrap().is_empty());
    }
}
