//! Application services

mod miss_coalescer;
mod question_service;
mod semantic_qa_service;

pub use miss_coalescer::MissCoalescer;
pub use question_service::QuestionService;
pub use semantic_qa_service::SemanticQaService;

use std::time::Instant;

use crate::domain::{DomainError, EmbeddingProvider, EmbeddingRequest};
use crate::infrastructure::observability::{record_provider_call, ProviderCallMetric};

/// Embed one text with the provider's default model
///
/// Any provider failure, or a response without a vector, is `EmbeddingUnavailable`.
pub(crate) async fn embed_text(
    provider: &dyn EmbeddingProvider,
    text: &str,
) -> Result<Vec<f32>, DomainError> {
    let request = EmbeddingRequest::single(provider.default_model(), text);

    let started = Instant::now();
    let result = provider.embed(request).await;
    record_provider_call(ProviderCallMetric {
        provider: provider.provider_name(),
        operation: "embed",
        duration: started.elapsed(),
        success: result.is_ok(),
    });

    result
        .map_err(|e| DomainError::embedding_unavailable(e.to_string()))?
        .into_first_vector()
        .ok_or_else(|| DomainError::embedding_unavailable("Provider returned no embedding"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::embedding::MockEmbeddingProvider;

    #[tokio::test]
    async fn test_embed_text_returns_first_vector() {
        let provider = MockEmbeddingProvider::new("mock", 2).with_vector("hello", vec![0.6, 0.8]);

        let vector = embed_text(&provider, "hello").await.unwrap();

        assert_eq!(vector, vec![0.6, 0.8]);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_embed_text_maps_provider_error() {
        let provider = MockEmbeddingProvider::new("mock", 2).with_error("unauthorized");

        let err = embed_text(&provider, "hello").await.unwrap_err();

        assert!(matches!(err, DomainError::EmbeddingUnavailable { .. }));
    }
}
