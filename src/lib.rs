//! Semantic QA
//!
//! Answers natural-language questions from a corpus of previously answered
//! ones, matched by embedding similarity:
//! - High-confidence matches are served straight from the store
//! - Weaker matches are annotated or adapted by a chat model
//! - Misses are generated once and stored for next time

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::{CachedQuestion, ChatHistoryEntry, ChatHistoryRepository, QuestionRepository};
use infrastructure::{
    answer::LlmAnswerGenerator,
    chat_history::{StorageChatHistoryRepository, CHAT_HISTORY_TABLE},
    embedding::OpenAiEmbeddingProvider,
    llm::{HttpClient, OpenAiProvider},
    question::{StorageQuestionRepository, QUESTIONS_TABLE},
    services::{MissCoalescer, QuestionService, SemanticQaService},
    storage::StorageFactory,
};
use tracing::{info, warn};

/// Build the application state from configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let providers = &config.providers;

    let api_key = providers.api_key.clone().unwrap_or_else(|| {
        warn!("No provider API key configured (providers.api_key / OPENAI_API_KEY)");
        String::new()
    });

    let http_client = Arc::new(HttpClient::with_timeout(providers.timeout())?);

    let embeddings = Arc::new(
        OpenAiEmbeddingProvider::with_base_url(
            http_client.clone(),
            api_key.clone(),
            &providers.base_url,
        )
        .with_model(&providers.embedding_model),
    );
    let llm = Arc::new(OpenAiProvider::with_base_url(
        http_client,
        api_key,
        &providers.base_url,
    ));
    let generator = Arc::new(LlmAnswerGenerator::new(llm, providers.generation_settings()));

    info!(
        base_url = %providers.base_url,
        embedding_model = %providers.embedding_model,
        chat_model = %providers.chat_model,
        "Providers configured"
    );

    let storage_config = config.storage.storage_config()?;
    let backend = StorageFactory::connect(&storage_config).await?;
    info!(backend = ?backend.storage_type(), "Storage connected");

    let questions: Arc<dyn QuestionRepository> = Arc::new(StorageQuestionRepository::new(
        backend.open::<CachedQuestion>(QUESTIONS_TABLE).await?,
    ));
    let history: Arc<dyn ChatHistoryRepository> = Arc::new(StorageChatHistoryRepository::new(
        backend.open::<ChatHistoryEntry>(CHAT_HISTORY_TABLE).await?,
    ));

    let mut qa_service = SemanticQaService::new(embeddings.clone(), questions.clone(), generator)
        .with_history(history.clone())
        .with_thresholds(config.engine.thresholds);

    if config.engine.coalesce_concurrent_misses {
        info!(
            ttl_secs = config.engine.coalesce_ttl_secs,
            "Coalescing concurrent cache misses"
        );
        qa_service = qa_service.with_coalescer(MissCoalescer::new(config.engine.coalesce_ttl()));
    }

    let question_service = QuestionService::new(embeddings, questions);

    Ok(AppState::new(
        Arc::new(qa_service),
        Arc::new(question_service),
        history,
    ))
}
