//! Question cache repository implementations

mod storage_repository;

pub use storage_repository::{StorageQuestionRepository, QUESTIONS_TABLE};
