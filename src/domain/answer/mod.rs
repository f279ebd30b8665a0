//! Answer generation domain trait

mod generator;

pub use generator::AnswerGenerator;

#[cfg(test)]
pub use generator::mock::MockAnswerGenerator;
