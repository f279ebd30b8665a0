//! Single-flight coalescing of concurrent cache misses

use std::future::Future;
use std::time::Duration;

use moka::future::Cache;
use sha2::{Digest, Sha256};

use crate::domain::{ChatTurn, DomainError};

/// Collapses concurrent misses for the same question into one computation
///
/// Questions are keyed by the SHA-256 of their normalized text (trimmed,
/// lower-cased, runs of whitespace collapsed). The entry only lives while
/// the leading request is in flight; `ttl` bounds it if the leader is
/// cancelled before cleanup.
#[derive(Debug, Clone)]
pub struct MissCoalescer {
    inflight: Cache<String, ChatTurn>,
}

impl MissCoalescer {
    pub fn new(ttl: Duration) -> Self {
        let inflight = Cache::builder()
            .time_to_live(ttl)
            .max_capacity(10_000)
            .build();

        Self { inflight }
    }

    pub fn key_for(question: &str) -> String {
        let normalized = question
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        hex::encode(Sha256::digest(normalized.as_bytes()))
    }

    /// Run `compute` unless an equivalent question is already being
    /// computed, in which case wait for and share that result
    pub async fn run<F>(&self, question: &str, compute: F) -> Result<ChatTurn, DomainError>
    where
        F: Future<Output = Result<ChatTurn, DomainError>>,
    {
        let key = Self::key_for(question);

        let result = self
            .inflight
            .try_get_with(key.clone(), compute)
            .await
            .map_err(|e| (*e).clone());

        self.inflight.invalidate(&key).await;
        result
    }
}
