//! Question cache domain models and traits

mod entity;
mod repository;

pub use entity::{CachedQuestion, QuestionId};
pub use repository::QuestionRepository;

#[cfg(test)]
pub use repository::mock::MockQuestionRepository;
