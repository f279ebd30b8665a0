//! Question corpus endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{
    ApiError, ApiResponse, CreateQuestionRequest, Json, QuestionView, SearchRequest, SearchResult,
};

/// POST /v1/questions
pub async fn create_question(
    State(state): State<AppState>,
    Json(request): Json<CreateQuestionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<QuestionView>>), ApiError> {
    let stored = state
        .question_service
        .add_question(&request.question, &request.answer)
        .await?;

    Ok((StatusCode::CREATED, ApiResponse::ok(QuestionView::from(&stored))))
}

/// GET /v1/questions
pub async fn list_questions(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<QuestionView>>>, ApiError> {
    let questions = state.question_service.list_questions().await?;

    Ok(ApiResponse::ok(
        questions.iter().map(QuestionView::from).collect(),
    ))
}

/// GET /v1/questions/{id}
pub async fn get_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<QuestionView>>, ApiError> {
    debug!(question_id = %id, "Getting question");

    let question = state.question_service.get_question(&id).await?;

    Ok(ApiResponse::ok(QuestionView::from(&question)))
}

/// POST /v1/questions/search
///
/// Similarity lookup only; nothing is generated or stored.
pub async fn search_questions(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<ApiResponse<Option<SearchResult>>>, ApiError> {
    if request.question.trim().is_empty() {
        return Err(ApiError::bad_request("Question is required"));
    }

    let found = state.qa_service.lookup(&request.question).await?;

    Ok(ApiResponse::ok(found.as_ref().map(SearchResult::from)))
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{get, post_json, TestApp};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_and_fetch_question() {
        let app = TestApp::new("unused");

        let (status, created) = post_json(
            app.router(),
            "/v1/questions",
            json!({"question": "What is 2+2?", "answer": "4"}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(created["data"].get("embedding").is_none());

        let id = created["data"]["id"].as_str().unwrap().to_string();
        let (status, fetched) = get(app.router(), &format!("/v1/questions/{}", id)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["data"]["answer"], "4");

        let (_, listed) = get(app.router(), "/v1/questions").await;
        assert_eq!(listed["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_question_is_not_found() {
        let app = TestApp::new("unused");

        let (status, body) = get(app.router(), "/v1/questions/does-not-exist").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["type"], "not_found_error");
    }

    #[tokio::test]
    async fn test_create_rejects_blank_answer() {
        let app = TestApp::new("unused");

        let (status, _) = post_json(
            app.router(),
            "/v1/questions",
            json!({"question": "What?", "answer": " "}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_search_finds_seeded_question_without_generating() {
        let app = TestApp::new("unused");
        post_json(
            app.router(),
            "/v1/questions",
            json!({"question": "What is 2+2?", "answer": "4"}),
        )
        .await;

        let (status, body) = post_json(
            app.router(),
            "/v1/questions/search",
            json!({"question": "What is 2+2?"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["question"]["answer"], "4");
        assert_eq!(body["data"]["confidence_tier"], "high");
        assert_eq!(app.generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_search_on_empty_corpus_is_null() {
        let app = TestApp::new("unused");

        let (status, body) = post_json(
            app.router(),
            "/v1/questions/search",
            json!({"question": "Anything"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["data"].is_null());
    }
}
