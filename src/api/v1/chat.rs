//! Chat endpoint handlers

use axum::extract::{Query, State};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{
    ApiError, ApiResponse, AskRequest, BatchAskRequest, ChatAnswer, HistoryQuery, Json,
};
use crate::domain::{ChatHistoryEntry, ChatTurn};

const MAX_BATCH_SIZE: usize = 50;

/// POST /v1/chat
pub async fn ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<ApiResponse<ChatAnswer>>, ApiError> {
    if request.question.trim().is_empty() {
        return Err(ApiError::bad_request("Question is required"));
    }

    debug!(question_len = request.question.len(), "Answering question");

    let turn = state.qa_service.answer(&request.question).await?;

    Ok(ApiResponse::ok(ChatAnswer::new(request.question, turn)))
}

/// POST /v1/chat/batch
pub async fn ask_batch(
    State(state): State<AppState>,
    Json(request): Json<BatchAskRequest>,
) -> Result<Json<ApiResponse<Vec<ChatTurn>>>, ApiError> {
    if request.questions.is_empty() {
        return Err(ApiError::bad_request("At least one question is required"));
    }
    if request.questions.len() > MAX_BATCH_SIZE {
        return Err(ApiError::bad_request(format!(
            "At most {} questions per batch",
            MAX_BATCH_SIZE
        )));
    }
    if let Some(index) = request.questions.iter().position(|q| q.trim().is_empty()) {
        return Err(ApiError::bad_request(format!(
            "Question at index {} is empty",
            index
        )));
    }

    debug!(count = request.questions.len(), "Answering batch");

    let turns = state.qa_service.answer_batch(&request.questions).await?;

    Ok(ApiResponse::ok(turns))
}

/// GET /v1/chat/history
pub async fn history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ApiResponse<Vec<ChatHistoryEntry>>>, ApiError> {
    let entries = state.history.find_recent(query.limit()).await?;

    Ok(ApiResponse::ok(entries))
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{get, post_json, TestApp};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_ask_generates_then_hits_cache() {
        let app = TestApp::new("Rust is a systems language.");

        let (status, first) =
            post_json(app.router(), "/v1/chat", json!({"question": "What is Rust?"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["success"], true);
        assert_eq!(first["data"]["question"], "What is Rust?");
        assert_eq!(first["data"]["source"], "generated");
        assert!(first["data"].get("confidence").is_none());

        let (_, second) =
            post_json(app.router(), "/v1/chat", json!({"question": "What is Rust?"})).await;
        assert_eq!(second["data"]["source"], "cache");
        assert_eq!(second["data"]["answer"], "Rust is a systems language.");
        assert_eq!(app.generator.call_count(), 1);
    }

    #[tokio::test]
    async fn test_blank_question_is_bad_request() {
        let app = TestApp::new("unused");

        let (status, body) = post_json(app.router(), "/v1/chat", json!({"question": "  "})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["type"], "invalid_request_error");
    }

    #[tokio::test]
    async fn test_missing_field_is_json_error() {
        let app = TestApp::new("unused");

        let (status, body) = post_json(app.router(), "/v1/chat", json!({"q": "hi"})).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "json_parse_error");
    }

    #[tokio::test]
    async fn test_embedding_outage_is_service_unavailable() {
        let app = TestApp::with_embedding_error("connection refused");

        let (status, body) =
            post_json(app.router(), "/v1/chat", json!({"question": "Anyone there?"})).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "embedding_unavailable");
    }

    #[tokio::test]
    async fn test_batch_preserves_order() {
        let app = TestApp::new("generated");

        let (status, body) = post_json(
            app.router(),
            "/v1/chat/batch",
            json!({"questions": ["first question", "second question"]}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let turns = body["data"].as_array().unwrap();
        assert_eq!(turns.len(), 2);
        assert!(turns.iter().all(|t| t["source"] == "generated"));
    }

    #[tokio::test]
    async fn test_batch_rejects_empty_entries() {
        let app = TestApp::new("generated");

        let (status, body) = post_json(
            app.router(),
            "/v1/chat/batch",
            json!({"questions": ["fine", ""]}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["message"].as_str().unwrap().contains("index 1"));
    }

    #[tokio::test]
    async fn test_history_lists_newest_first() {
        let app = TestApp::new("generated");

        for question in ["one", "two", "three"] {
            post_json(app.router(), "/v1/chat", json!({ "question": question })).await;
        }

        let (status, body) = get(app.router(), "/v1/chat/history?limit=2").await;

        assert_eq!(status, StatusCode::OK);
        let entries = body["data"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["question"], "three");
        assert_eq!(entries[1]["question"], "two");
    }
}
