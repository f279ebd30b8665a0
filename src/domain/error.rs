use thiserror::Error;

/// Core domain errors
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Embedding unavailable: {message}")]
    EmbeddingUnavailable { message: String },

    #[error("Provider unavailable: {provider} - {message}")]
    ProviderUnavailable { provider: String, message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    pub fn embedding_unavailable(message: impl Into<String>) -> Self {
        Self::EmbeddingUnavailable {
            message: message.into(),
        }
    }

    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ProviderUnavailable {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether the error comes from an external dependency being unreachable
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::EmbeddingUnavailable { .. } | Self::ProviderUnavailable { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_error() {
        let error = DomainError::dimension_mismatch(3, 2);
        assert_eq!(
            error.to_string(),
            "Embedding dimension mismatch: expected 3, got 2"
        );
    }

    #[test]
    fn test_provider_error() {
        let error = DomainError::provider("openai", "HTTP 401: invalid key");
        assert_eq!(
            error.to_string(),
            "Provider unavailable: openai - HTTP 401: invalid key"
        );
        assert!(error.is_unavailable());
    }

    #[test]
    fn test_embedding_unavailable_is_unavailable() {
        let error = DomainError::embedding_unavailable("timeout");
        assert!(error.is_unavailable());
        assert!(!DomainError::storage("disk full").is_unavailable());
    }

    #[test]
    fn test_validation_error() {
        let error = DomainError::validation("Question is required");
        assert_eq!(error.to_string(), "Validation error: Question is required");
    }
}
