//! Answer matching with typo tolerance.

use crate::normalize::{friendly_candidates, parse_user_answer};
use crate::types::{MatchingMode, Question};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const EDIT_COST: usize = 2;
const TRANSPOSITION_COST: usize = 1;

/// Nearest candidate found for a single user token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMatch {
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<usize>,
    pub accepted: bool,
}

/// Result of checking a typed answer against a question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    /// Whether the answer is considered correct.
    pub is_correct: bool,
    /// The matching mode used.
    pub matching_mode: MatchingMode,
    /// Normalized user tokens, empty when there was no input.
    pub user_answers: Vec<String>,
    /// Normalized candidate answers the tokens were compared with.
    pub candidates: Vec<String>,
    /// Per-token closest candidate.
    pub closest: Vec<TokenMatch>,
}

/// Check raw user input against a question.
///
/// Missing input, blank input and questions without candidates all give an
/// incorrect verdict.
pub fn check_answer(question: &Question, raw: Option<&str>, mode: MatchingMode) -> MatchResult {
    let user_answers = parse_user_answer(raw).unwrap_or_default();
    let candidates = friendly_candidates(question);

    let closest: Vec<TokenMatch> = user_answers
        .iter()
        .map(|token| closest_candidate(token, &candidates, mode))
        .collect();

    let is_correct = match mode {
        MatchingMode::Exact => {
            !closest.is_empty() && !candidates.is_empty() && closest.iter().all(|m| m.accepted)
        }
        MatchingMode::Fuzzy => all_answers_correct(user_answers.as_slice(), &candidates),
    };

    tracing::debug!(
        term = %question.term,
        mode = mode.as_str(),
        tokens = user_answers.len(),
        is_correct,
        "checked answer"
    );

    MatchResult {
        is_correct,
        matching_mode: mode,
        user_answers,
        candidates: candidates.into_iter().collect(),
        closest,
    }
}

fn closest_candidate(token: &str, candidates: &BTreeSet<String>, mode: MatchingMode) -> TokenMatch {
    let nearest = candidates
        .iter()
        .map(|candidate| (candidate, edit_distance(token, candidate)))
        .min_by_key(|(_, distance)| *distance);

    let accepted = match mode {
        MatchingMode::Exact => !token.is_empty() && candidates.contains(token),
        MatchingMode::Fuzzy => candidates.iter().any(|candidate| is_match(token, candidate)),
    };

    TokenMatch {
        token: token.to_string(),
        candidate: nearest.map(|(candidate, _)| candidate.clone()),
        distance: nearest.map(|(_, distance)| distance),
        accepted,
    }
}

/// Whether every user token matches at least one candidate.
///
/// An empty token list is never correct.
pub fn all_answers_correct<S: AsRef<str>>(user_answers: &[S], candidates: &BTreeSet<String>) -> bool {
    if user_answers.is_empty() || candidates.is_empty() {
        return false;
    }

    user_answers.iter().all(|answer| {
        candidates
            .iter()
            .any(|candidate| is_match(answer.as_ref(), candidate))
    })
}

/// Whether a user token is the candidate or close enough to it.
///
/// Tolerance is taken from the candidate, not from the user's token.
pub fn is_match(user_answer: &str, candidate: &str) -> bool {
    if user_answer.is_empty() {
        return false;
    }
    user_answer == candidate || edit_distance(user_answer, candidate) <= distance_tolerance(candidate)
}

/// Maximum accepted edit distance for a correct answer.
///
/// Words of up to two characters must be exact; longer words allow the
/// integer cube root of their length.
pub fn distance_tolerance(word: &str) -> usize {
    let len = word.chars().count();
    if len <= 2 {
        return 0;
    }
    integer_cbrt(len)
}

fn integer_cbrt(n: usize) -> usize {
    let mut root = (n as f64).cbrt().round() as usize;
    while root * root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}

/// Weighted Damerau-Levenshtein distance (optimal string alignment).
///
/// Insertions, deletions and substitutions cost 2; swapping two adjacent
/// characters costs 1.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n * EDIT_COST;
    }
    if n == 0 {
        return m * EDIT_COST;
    }

    // Transpositions look two rows back, so keep three rows.
    let mut before_prev = vec![0; n + 1];
    let mut prev = (0..=n).map(|j| j * EDIT_COST).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i * EDIT_COST;

        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);

            let mut best = (prev[j] + EDIT_COST) // deletion
                .min(curr[j - 1] + EDIT_COST) // insertion
                .min(prev[j - 1] + cost * EDIT_COST); // substitution

            if i > 1
                && j > 1
                && a_chars[i - 1] == b_chars[j - 2]
                && a_chars[i - 2] == b_chars[j - 1]
            {
                best = best.min(before_prev[j - 2] + cost * TRANSPOSITION_COST);
            }

            curr[j] = best;
        }

        std::mem::swap(&mut before_prev, &mut prev);
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}
