//! Answer generator implementations

mod llm_generator;

pub use llm_generator::{GenerationSettings, LlmAnswerGenerator};
