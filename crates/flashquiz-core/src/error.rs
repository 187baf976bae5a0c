//! Quiz error types.

use thiserror::Error;

/// Errors that can occur while choosing questions for a quiz.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    /// No question type is available for the card.
    #[error("no question type is available for card {card_id}")]
    EmptySelection { card_id: i64 },

    /// The card set a quiz was requested for is empty.
    #[error("no cards match the quiz filter")]
    NoCards,

    /// The card repository failed to load cards.
    #[error("failed to load cards: {0}")]
    Repository(String),
}
