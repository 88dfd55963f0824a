//! Per-session quiz bookkeeping.

use crate::matching::{check_answer, MatchResult};
use crate::types::{Question, QuizSettings};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How an attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Correct,
    Incorrect,
    TimedOut,
}

/// One answered (or abandoned) question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attempt {
    pub term: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    pub outcome: Outcome,
    pub answered_at: DateTime<Utc>,
}

impl Attempt {
    pub fn is_correct(&self) -> bool {
        self.outcome == Outcome::Correct
    }
}

/// State for one run of the quiz.
///
/// Owned by whoever drives the quiz; nothing here is shared between sessions.
#[derive(Debug, Clone)]
pub struct QuizSession {
    settings: QuizSettings,
    started_at: DateTime<Utc>,
    history: Vec<Attempt>,
}

impl QuizSession {
    pub fn new(settings: QuizSettings) -> Self {
        Self {
            settings,
            started_at: Utc::now(),
            history: Vec::new(),
        }
    }

    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn history(&self) -> &[Attempt] {
        &self.history
    }

    /// Check an answer with the session's matching mode and record it.
    pub fn submit(&mut self, question: &Question, raw: Option<&str>) -> MatchResult {
        let result = check_answer(question, raw, self.settings.matching_mode);
        let outcome = if result.is_correct {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        };
        self.record(question, raw.map(str::to_string), outcome);
        result
    }

    /// Record a question the user ran out of time on.
    pub fn timed_out(&mut self, question: &Question) {
        self.record(question, None, Outcome::TimedOut);
    }

    fn record(&mut self, question: &Question, input: Option<String>, outcome: Outcome) {
        tracing::info!(term = %question.term, ?outcome, "answer recorded");
        self.history.push(Attempt {
            term: question.term.clone(),
            input,
            outcome,
            answered_at: Utc::now(),
        });
    }

    pub fn answered(&self) -> usize {
        self.history.len()
    }

    pub fn correct(&self) -> usize {
        self.history.iter().filter(|a| a.is_correct()).count()
    }

    /// Share of correct attempts, or `None` before the first attempt.
    pub fn accuracy(&self) -> Option<f64> {
        if self.history.is_empty() {
            return None;
        }
        Some(self.correct() as f64 / self.answered() as f64)
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new(QuizSettings::default())
    }
}
