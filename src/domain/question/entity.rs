//! Cached question entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::storage::{StorageEntity, StorageKey};

/// Opaque question identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for QuestionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for QuestionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for QuestionId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// A question/answer pair with the embedding used for matching
///
/// Created once on a cache miss (or by seeding) and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedQuestion {
    id: QuestionId,
    question: String,
    answer: String,
    embedding: Vec<f32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CachedQuestion {
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        embedding: Vec<f32>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: QuestionId::generate(),
            question: question.into(),
            answer: answer.into(),
            embedding,
            created_at: now,
            updated_at: now,
        }
    }

    /// Override the generated identifier
    pub fn with_id(mut self, id: impl Into<QuestionId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn embedding(&self) -> &[f32] {
        &self.embedding
    }

    /// Number of dimensions of the stored embedding
    pub fn dimensions(&self) -> usize {
        self.embedding.len()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl StorageEntity for CachedQuestion {
    type Key = QuestionId;

    fn key(&self) -> &Self::Key {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
