//! Request logging with header redaction
//!
//! Spans come from `TraceLayer`; this only emits the start and completion
//! events inside that span.

use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use tracing::{info, warn};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Headers worth logging; the first group is masked
const REDACTED_HEADERS: &[&str] = &["authorization", "x-api-key", "cookie", "proxy-authorization"];
const LOGGED_HEADERS: &[&str] = &[
    "content-type",
    "content-length",
    "accept",
    "user-agent",
    REQUEST_ID_HEADER,
    "x-forwarded-for",
];

pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    info!(
        method = %method,
        path = %path,
        request_id = %request_id,
        headers = %loggable_headers(request.headers()),
        "Incoming request"
    );

    let response = next.run(request).await;
    let status = response.status();
    let duration_ms = start.elapsed().as_millis() as u64;

    if status.is_server_error() {
        warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms,
            request_id = %request_id,
            "Request failed"
        );
    } else {
        info!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms,
            request_id = %request_id,
            "Request completed"
        );
    }

    response
}

/// `name=value` pairs for the allow-listed headers, secrets masked
fn loggable_headers(headers: &HeaderMap) -> String {
    headers
        .iter()
        .filter_map(|(name, value)| {
            let name = name.as_str();

            if REDACTED_HEADERS.contains(&name) {
                Some(format!("{}=[REDACTED]", name))
            } else if LOGGED_HEADERS.contains(&name) {
                Some(format!("{}={}", name, value.to_str().unwrap_or("[invalid]")))
            } else {
                None
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
