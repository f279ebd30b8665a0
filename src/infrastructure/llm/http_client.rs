use std::sync::{Arc, LazyLock};
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;

use crate::domain::DomainError;

static SECRET_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""(api_key|authorization|token|secret)"\s*:\s*"[^"]*""#)
        .unwrap_or_else(|e| panic!("invalid secret field pattern: {e}"))
});

static API_KEY_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"sk-[A-Za-z0-9_\-*]{4,}").unwrap_or_else(|e| panic!("invalid api key pattern: {e}"))
});

const MAX_ERROR_BODY_LEN: usize = 500;

/// Mask credentials a provider may echo back in an error body
pub(crate) fn redact_error_body(body: &str) -> String {
    let body = SECRET_FIELD.replace_all(body, r#""$1": "[REDACTED]""#);
    let body = API_KEY_TOKEN.replace_all(&body, "[REDACTED]");

    body.chars().take(MAX_ERROR_BODY_LEN).collect()
}

/// JSON-over-HTTP seam shared by the provider clients
#[async_trait]
pub trait HttpClientTrait: Send + Sync + std::fmt::Debug {
    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError>;
}

#[async_trait]
impl<T: HttpClientTrait + ?Sized> HttpClientTrait for Arc<T> {
    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError> {
        (**self).post_json(url, headers, body).await
    }
}

/// reqwest-backed client
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Client whose requests fail after `timeout`
    pub fn with_timeout(timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                DomainError::configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClientTrait for HttpClient {
    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError> {
        let mut request = self.client.post(url);

        for (key, value) in headers {
            request = request.header(key, value);
        }

        let response = request
            .json(body)
            .send()
            .await
            .map_err(|e| DomainError::provider("http", format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            return Err(DomainError::provider(
                "http",
                format!("HTTP {}: {}", status, redact_error_body(&error_body)),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| DomainError::provider("http", format!("Failed to parse response: {}", e)))
    }
}
