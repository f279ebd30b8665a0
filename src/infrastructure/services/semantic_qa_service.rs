//! Semantic question answering engine
//!
//! Answers a question from the stored corpus when a semantically similar
//! question exists, and otherwise generates a fresh answer and stores it so
//! the next similar question becomes a cache hit.

use std::sync::Arc;
use std::time::Instant;

use futures::future::try_join_all;
use tracing::{debug, info, warn};

use super::{embed_text, MissCoalescer};
use crate::domain::{
    find_most_similar, AnswerGenerator, ChatHistoryEntry, ChatHistoryRepository, ChatTurn,
    ConfidenceThresholds, ConfidenceTier, DomainError, EmbeddingProvider, QuestionRepository,
    SimilarityResult,
};
use crate::infrastructure::observability::record_answer;

/// Context handed to the generator when a low-confidence match is adapted
fn adaptation_context(result: &SimilarityResult) -> String {
    format!(
        "A similar question in our database is: \"{}\" with answer: \"{}\". \
         Adapt that answer to the user's question where the two differ.",
        result.matched_question.question(),
        result.matched_question.answer()
    )
}

/// Stored answer followed by a rounded confidence note
fn annotate_with_confidence(answer: &str, similarity: f32) -> String {
    format!(
        "{}\n\n(Confidence: {}%)",
        answer,
        (similarity * 100.0).round() as i64
    )
}

#[derive(Debug)]
pub struct SemanticQaService {
    embeddings: Arc<dyn EmbeddingProvider>,
    questions: Arc<dyn QuestionRepository>,
    generator: Arc<dyn AnswerGenerator>,
    history: Option<Arc<dyn ChatHistoryRepository>>,
    thresholds: ConfidenceThresholds,
    coalescer: Option<MissCoalescer>,
}

impl SemanticQaService {
    pub fn new(
        embeddings: Arc<dyn EmbeddingProvider>,
        questions: Arc<dyn QuestionRepository>,
        generator: Arc<dyn AnswerGenerator>,
    ) -> Self {
        Self {
            embeddings,
            questions,
            generator,
            history: None,
            thresholds: ConfidenceThresholds::default(),
            coalescer: None,
        }
    }

    /// Record every answered question in `history`
    pub fn with_history(mut self, history: Arc<dyn ChatHistoryRepository>) -> Self {
        self.history = Some(history);
        self
    }

    pub fn with_thresholds(mut self, thresholds: ConfidenceThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Share one generation between concurrent misses of the same question
    pub fn with_coalescer(mut self, coalescer: MissCoalescer) -> Self {
        self.coalescer = Some(coalescer);
        self
    }

    pub fn thresholds(&self) -> &ConfidenceThresholds {
        &self.thresholds
    }

    /// Answer one question
    ///
    /// Surrounding whitespace is dropped before the question is embedded or stored.
    pub async fn answer(&self, question: &str) -> Result<ChatTurn, DomainError> {
        let started = Instant::now();
        let question = question.trim();
        let (embedding, matched) = self.search(question).await?;

        let (turn, tier) = match matched {
            Some(result) if result.confidence_tier != ConfidenceTier::None => {
                let tier = result.confidence_tier;
                (self.answer_from_match(question, &result).await, tier)
            }
            _ => (self.answer_miss(question, embedding).await?, ConfidenceTier::None),
        };

        record_answer(turn.source, tier, started.elapsed());
        info!(
            source = %turn.source,
            tier = %tier,
            confidence = ?turn.confidence,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Question answered"
        );

        self.record_history(question, &turn).await;

        Ok(turn)
    }

    /// Answer several questions concurrently, preserving input order
    ///
    /// The first failure fails the whole batch.
    pub async fn answer_batch(&self, questions: &[String]) -> Result<Vec<ChatTurn>, DomainError> {
        try_join_all(questions.iter().map(|q| self.answer(q))).await
    }

    /// Best stored match for `question` without generating or storing anything
    pub async fn lookup(&self, question: &str) -> Result<Option<SimilarityResult>, DomainError> {
        let (_, matched) = self.search(question.trim()).await?;
        Ok(matched)
    }

    async fn search(
        &self,
        question: &str,
    ) -> Result<(Vec<f32>, Option<SimilarityResult>), DomainError> {
        if question.is_empty() {
            return Err(DomainError::validation("Question must not be empty"));
        }

        let embedding = embed_text(self.embeddings.as_ref(), question).await?;
        let candidates = self.questions.find_all().await?;
        let matched = find_most_similar(&embedding, &candidates, &self.thresholds)?;

        debug!(
            candidates = candidates.len(),
            similarity = matched.as_ref().map(|m| m.similarity),
            "Similarity search complete"
        );

        Ok((embedding, matched))
    }

    async fn answer_from_match(&self, question: &str, result: &SimilarityResult) -> ChatTurn {
        let stored = result.matched_question.answer();
        let similarity = result.similarity;

        match result.confidence_tier {
            ConfidenceTier::High => ChatTurn::cached(stored, similarity),
            ConfidenceTier::Medium => {
                ChatTurn::cached(annotate_with_confidence(stored, similarity), similarity)
            }
            _ => {
                let context = adaptation_context(result);

                match self.generator.adapt(question, &context, stored).await {
                    Ok(adapted) => ChatTurn::cached(adapted, similarity),
                    Err(e) => {
                        warn!(
                            matched_id = %result.matched_question.id(),
                            error = %e,
                            "Adaptation failed, using stored answer"
                        );
                        ChatTurn::cached(stored, similarity)
                    }
                }
            }
        }
    }

    async fn answer_miss(
        &self,
        question: &str,
        embedding: Vec<f32>,
    ) -> Result<ChatTurn, DomainError> {
        match &self.coalescer {
            Some(coalescer) => {
                coalescer
                    .run(question, self.generate_and_store(question, embedding))
                    .await
            }
            None => self.generate_and_store(question, embedding).await,
        }
    }

    async fn generate_and_store(
        &self,
        question: &str,
        embedding: Vec<f32>,
    ) -> Result<ChatTurn, DomainError> {
        let answer = self.generator.generate(question, None).await?;
        let stored = self.questions.create(question, &answer, embedding).await?;

        debug!(question_id = %stored.id(), "Stored generated answer");

        Ok(ChatTurn::generated(answer))
    }

    async fn record_history(&self, question: &str, turn: &ChatTurn) {
        let Some(history) = &self.history else {
            return;
        };

        if let Err(e) = history.create(ChatHistoryEntry::from_turn(question, turn)).await {
            warn!(error = %e, "Failed to record chat history");
        }
    }
}
