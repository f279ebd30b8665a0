//! Chat history repository implementations

mod storage_repository;

pub use storage_repository::{StorageChatHistoryRepository, CHAT_HISTORY_TABLE};
