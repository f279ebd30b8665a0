//! Request/response bodies and the error envelope

pub mod chat;
pub mod error;
pub mod json;
pub mod question;

use serde::Serialize;

pub use chat::{AskRequest, BatchAskRequest, ChatAnswer, HistoryQuery};
pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
pub use question::{CreateQuestionRequest, QuestionView, SearchRequest, SearchResult};

/// `{ "success": true, "data": ... }`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}
