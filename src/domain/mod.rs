//! Domain layer - entities, provider contracts and the similarity engine

pub mod answer;
pub mod chat;
pub mod embedding;
pub mod error;
pub mod llm;
pub mod question;
pub mod similarity;
pub mod storage;

pub use answer::AnswerGenerator;
pub use chat::{AnswerSource, ChatHistoryEntry, ChatHistoryId, ChatHistoryRepository, ChatTurn};
pub use embedding::{Embedding, EmbeddingProvider, EmbeddingRequest, EmbeddingResponse};
pub use error::DomainError;
pub use llm::{LlmProvider, LlmRequest, LlmResponse, Message, MessageRole};
pub use question::{CachedQuestion, QuestionId, QuestionRepository};
pub use similarity::{
    cosine_similarity, find_most_similar, ConfidenceThresholds, ConfidenceTier, SimilarityResult,
};
pub use storage::{Storage, StorageEntity, StorageKey};
