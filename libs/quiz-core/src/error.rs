//! Error types for quiz-core.

use thiserror::Error;

/// Result type alias using QuizError.
pub type Result<T> = std::result::Result<T, QuizError>;

/// Errors raised while building questions or loading dictionaries.
///
/// Answer checking itself never fails: malformed user input is simply an
/// incorrect answer.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("invalid question term: {term:?}")]
    InvalidTerm { term: String },

    #[error("question {term} has neither meanings nor readings")]
    NoAnswers { term: String },

    #[error("bad dictionary: {0}")]
    BadDictionary(#[from] serde_json::Error),

    #[error("empty dictionary")]
    EmptyDictionary,
}
