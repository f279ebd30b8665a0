//! Embedding request types

use serde::{Deserialize, Serialize};

/// Text(s) to embed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmbeddingInput {
    Single(String),
    Batch(Vec<String>),
}

impl EmbeddingInput {
    pub fn as_vec(&self) -> Vec<&str> {
        match self {
            EmbeddingInput::Single(s) => vec![s.as_str()],
            EmbeddingInput::Batch(v) => v.iter().map(String::as_str).collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            EmbeddingInput::Single(_) => 1,
            EmbeddingInput::Batch(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            EmbeddingInput::Single(s) => s.is_empty(),
            EmbeddingInput::Batch(v) => v.is_empty(),
        }
    }
}

/// Request body for an embeddings endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    model: String,
    input: EmbeddingInput,
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<usize>,
}

impl EmbeddingRequest {
    pub fn new(model: impl Into<String>, input: EmbeddingInput) -> Self {
        Self {
            model: model.into(),
            input,
            dimensions: None,
        }
    }

    /// Request for a single text, the shape every question lookup uses
    pub fn single(model: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(model, EmbeddingInput::Single(text.into()))
    }

    pub fn batch(model: impl Into<String>, texts: Vec<String>) -> Self {
        Self::new(model, EmbeddingInput::Batch(texts))
    }

    /// Ask the provider to truncate vectors (models that support it)
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn input(&self) -> &EmbeddingInput {
        &self.input
    }

    pub fn inputs(&self) -> Vec<&str> {
        self.input.as_vec()
    }

    pub fn dimensions(&self) -> Option<usize> {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_request_serializes_as_string_input() {
        let request = EmbeddingRequest::single("text-embedding-3-small", "What is Rust?");

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "text-embedding-3-small");
        assert_eq!(json["input"], "What is Rust?");
        assert!(json.get("dimensions").is_none());
    }

    #[test]
    fn test_batch_request() {
        let request =
            EmbeddingRequest::batch("text-embedding-3-small", vec!["a".into(), "b".into()])
                .with_dimensions(256);

        assert_eq!(request.inputs(), vec!["a", "b"]);
        assert_eq!(request.input().len(), 2);
        assert_eq!(request.dimensions(), Some(256));
    }

    #[test]
    fn test_empty_input() {
        assert!(EmbeddingInput::Single(String::new()).is_empty());
        assert!(EmbeddingInput::Batch(vec![]).is_empty());
        assert!(!EmbeddingInput::Single("x".into()).is_empty());
    }
}
