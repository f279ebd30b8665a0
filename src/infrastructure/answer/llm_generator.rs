//! Answer generator backed by a chat-completion provider

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::{AnswerGenerator, DomainError, LlmProvider, LlmRequest};
use crate::infrastructure::observability::{record_provider_call, ProviderCallMetric};

const BASE_SYSTEM_PROMPT: &str = "You are a helpful assistant.";
pub const DEFAULT_FALLBACK_ANSWER: &str = "I'm sorry, I couldn't generate an answer.";

/// Per-call completion parameters
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Returned when the provider answers with blank text
    pub fallback_answer: String,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            max_tokens: 500,
            fallback_answer: DEFAULT_FALLBACK_ANSWER.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct LlmAnswerGenerator {
    provider: Arc<dyn LlmProvider>,
    settings: GenerationSettings,
}

impl LlmAnswerGenerator {
    pub fn new(provider: Arc<dyn LlmProvider>, settings: GenerationSettings) -> Self {
        Self { provider, settings }
    }

    fn system_prompt(context: Option<&str>) -> String {
        match context {
            Some(context) => format!(
                "{} Use the following context to answer questions: {}",
                BASE_SYSTEM_PROMPT, context
            ),
            None => BASE_SYSTEM_PROMPT.to_string(),
        }
    }

    fn build_request(&self, question: &str, context: Option<&str>) -> LlmRequest {
        LlmRequest::builder()
            .system(Self::system_prompt(context))
            .user(question)
            .temperature(self.settings.temperature)
            .max_tokens(self.settings.max_tokens)
            .build()
    }

    /// Chat completion for `question`; a blank completion yields `fallback`
    async fn complete(
        &self,
        question: &str,
        context: Option<&str>,
        fallback: &str,
    ) -> Result<String, DomainError> {
        let request = self.build_request(question, context);
        let provider = self.provider.provider_name();

        let start = Instant::now();
        let result = self.provider.chat(&self.settings.model, request).await;
        record_provider_call(ProviderCallMetric {
            provider,
            operation: "chat",
            duration: start.elapsed(),
            success: result.is_ok(),
        });

        let response = result?;
        let answer = response.content().trim();

        if answer.is_empty() {
            warn!(provider, model = %self.settings.model, "Provider returned a blank completion");
            return Ok(fallback.to_string());
        }

        debug!(
            provider,
            model = %response.model,
            with_context = context.is_some(),
            "Generated answer"
        );

        Ok(answer.to_string())
    }
}

#[async_trait]
impl AnswerGenerator for LlmAnswerGenerator {
    async fn generate(
        &self,
        question: &str,
        context: Option<&str>,
    ) -> Result<String, DomainError> {
        self.complete(question, context, &self.settings.fallback_answer).await
    }

    async fn adapt(
        &self,
        question: &str,
        context: &str,
        stored_answer: &str,
    ) -> Result<String, DomainError> {
        self.complete(question, Some(context), stored_answer).await
    }
}
