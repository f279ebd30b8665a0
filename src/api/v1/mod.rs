//! Versioned question-answering endpoints

pub mod chat;
pub mod questions;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/chat", post(chat::ask))
        .route("/chat/batch", post(chat::ask_batch))
        .route("/chat/history", get(chat::history))
        .route(
            "/questions",
            get(questions::list_questions).post(questions::create_question),
        )
        .route("/questions/search", post(questions::search_questions))
        .route("/questions/{id}", get(questions::get_question))
}
