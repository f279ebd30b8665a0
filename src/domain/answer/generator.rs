//! Answer generator trait

use async_trait::async_trait;
use std::fmt::Debug;
use tracing::warn;

use crate::domain::DomainError;

/// Produces an answer for a question, optionally guided by context
///
/// Implementations never return an empty string.
#[async_trait]
pub trait AnswerGenerator: Send + Sync + Debug {
    async fn generate(&self, question: &str, context: Option<&str>)
        -> Result<String, DomainError>;

    /// Rewrite `stored_answer` for `question`, guided by `context`
    ///
    /// Blank output yields `stored_answer` unchanged.
    async fn adapt(
        &self,
        question: &str,
        context: &str,
        stored_answer: &str,
    ) -> Result<String, DomainError> {
        let adapted = self.generate(question, Some(context)).await?;

        if adapted.trim().is_empty() {
            warn!("Adaptation returned no text, using stored answer");
            return Ok(stored_answer.to_string());
        }

        Ok(adapted)
    }
}
