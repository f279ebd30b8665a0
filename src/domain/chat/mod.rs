//! Chat turns and the history of answered questions

mod history;
mod turn;

pub use history::{ChatHistoryEntry, ChatHistoryId, ChatHistoryRepository};
pub use turn::{AnswerSource, ChatTurn};

#[cfg(test)]
pub use history::MockChatHistoryRepository;
