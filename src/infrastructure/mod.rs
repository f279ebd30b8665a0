//! Infrastructure layer - providers, storage, observability and services

pub mod answer;
pub mod chat_history;
pub mod embedding;
pub mod llm;
pub mod observability;
pub mod question;
pub mod services;
pub mod storage;
