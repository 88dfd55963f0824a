//! Core library for the kanji quiz.
//!
//! Provides:
//! - Answer normalization (comma-separated input, simplified glosses)
//! - Typo-tolerant answer matching (weighted Damerau-Levenshtein distance)
//! - Question and dictionary types, with preference-based filtering
//! - Per-session attempt bookkeeping

pub mod dictionary;
pub mod error;
pub mod matching;
pub mod normalize;
pub mod session;
pub mod types;

pub use dictionary::{Dictionary, DictionaryEntry};
pub use error::{QuizError, Result};
pub use matching::{
    all_answers_correct, check_answer, distance_tolerance, edit_distance, is_match, MatchResult,
    TokenMatch,
};
pub use normalize::{correct_answers, friendly_candidates, parse_user_answer, simplify};
pub use session::{Attempt, Outcome, QuizSession};
pub use types::{AnswerKind, DictionaryKind, MatchingMode, Question, QuizSettings};
