//! Prometheus metrics infrastructure

use std::sync::{Arc, LazyLock};
use std::time::Duration;

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use regex::Regex;

use super::config::MetricsConfig;
use crate::domain::{AnswerSource, ConfidenceTier};

static UUID_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}")
        .unwrap_or_else(|e| panic!("invalid uuid pattern: {e}"))
});

static NUMERIC_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/\d+(/|$)").unwrap_or_else(|e| panic!("invalid numeric pattern: {e}"))
});

const MAX_PATH_LABEL_LEN: usize = 50;

/// Handle used to render the `/metrics` endpoint
#[derive(Clone)]
pub struct PrometheusMetrics {
    handle: Arc<PrometheusHandle>,
}

impl PrometheusMetrics {
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Install the Prometheus recorder; `None` when disabled or already installed
pub fn init_metrics(config: &MetricsConfig) -> Option<PrometheusMetrics> {
    if !config.enabled {
        tracing::info!("Prometheus metrics disabled");
        return None;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            gauge!("semantic_qa_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
            tracing::info!(path = %config.path, "Prometheus metrics initialized");

            Some(PrometheusMetrics {
                handle: Arc::new(handle),
            })
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize Prometheus metrics");
            None
        }
    }
}

pub fn create_metrics_router(metrics: PrometheusMetrics, path: &str) -> Router {
    Router::new()
        .route(path, get(metrics_handler))
        .with_state(metrics)
}

async fn metrics_handler(State(metrics): State<PrometheusMetrics>) -> impl IntoResponse {
    metrics.render()
}

pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    let labels = [
        ("method", method.to_string()),
        ("path", sanitize_path(path)),
        ("status", status.to_string()),
    ];

    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_seconds", &labels).record(duration.as_secs_f64());

    if status >= 500 {
        counter!("http_server_errors_total", &labels).increment(1);
    }
}

/// One answered question, by where the answer came from
pub fn record_answer(source: AnswerSource, tier: ConfidenceTier, duration: Duration) {
    let labels = [
        ("source", source.as_str().to_string()),
        ("tier", tier.as_str().to_string()),
    ];

    counter!("qa_answers_total", &labels).increment(1);
    histogram!("qa_answer_duration_seconds", &labels).record(duration.as_secs_f64());
}

/// Outcome of one call to an embedding or chat provider
pub struct ProviderCallMetric<'a> {
    pub provider: &'a str,
    /// `embed` or `chat`
    pub operation: &'a str,
    pub duration: Duration,
    pub success: bool,
}

pub fn record_provider_call(metric: ProviderCallMetric<'_>) {
    let labels = [
        ("provider", metric.provider.to_string()),
        ("operation", metric.operation.to_string()),
        (
            "status",
            if metric.success { "success" } else { "error" }.to_string(),
        ),
    ];

    counter!("provider_requests_total", &labels).increment(1);
    histogram!("provider_request_duration_seconds", &labels)
        .record(metric.duration.as_secs_f64());
}

/// Collapse ids in a request path so labels stay low-cardinality
fn sanitize_path(path: &str) -> String {
    let path = UUID_SEGMENT.replace_all(path, "{id}");
    let path = NUMERIC_SEGMENT.replace_all(&path, "/{id}$1");

    path.chars().take(MAX_PATH_LABEL_LEN).collect()
}
