//! Answer normalization.
//!
//! Turns raw user input and dictionary glosses into comparable lower-case
//! strings. Glosses are expanded into a strict form and a friendlier form
//! without leading articles or parenthesized notes, so that both
//! "second (1/60 minute)" and "second" are accepted.

use crate::types::Question;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static ANSWER_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*,\s*").unwrap());
static LEADING_ARTICLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(?:a|the) ").unwrap());
static PARENTHESIZED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" ?\([^()]*\)").unwrap());

/// Split a raw answer into lower-case tokens.
///
/// Tokens are separated by commas with optional surrounding whitespace;
/// plain spaces do not split. Returns `None` when there is no input at all.
/// Empty tokens (blank input, trailing commas) are kept as empty strings.
pub fn parse_user_answer(raw: Option<&str>) -> Option<Vec<String>> {
    let raw = raw?.trim().to_lowercase();
    Some(ANSWER_SEPARATOR.split(&raw).map(str::to_string).collect())
}

/// Glosses that answer the question.
pub fn correct_answers(question: &Question) -> &[String] {
    question.correct_answers()
}

/// Strip leading articles and parenthesized notes from a gloss.
///
/// ```
/// use quiz_core::normalize::simplify;
///
/// assert_eq!(simplify(" whitespace "), "whitespace");
/// assert_eq!(simplify("the government"), "government");
/// assert_eq!(simplify("fetch the ball"), "fetch the ball");
/// assert_eq!(simplify("a second (1/60 minute)"), "second");
/// ```
pub fn simplify(gloss: &str) -> String {
    let mut current = gloss.trim().to_string();
    // Repeat until stable: "a (x) the y" needs two passes.
    loop {
        let next = simplify_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn simplify_once(gloss: &str) -> String {
    let stripped = LEADING_ARTICLE.replace(gloss.trim(), "");
    let mut text = stripped.into_owned();
    // Innermost groups go first, so nested brackets need several rounds.
    while PARENTHESIZED.is_match(&text) {
        text = PARENTHESIZED.replace_all(&text, "").into_owned();
    }
    text.trim().to_string()
}

/// Lower-cased candidate answers for a question, with simplified variants.
///
/// Empty simplifications (a gloss that is only a note) are left out so that
/// a blank answer can never be accepted.
pub fn friendly_candidates(question: &Question) -> BTreeSet<String> {
    let mut candidates = BTreeSet::new();

    for gloss in correct_answers(question) {
        let answer = gloss.to_lowercase();
        let simplified = simplify(&answer);
        if !simplified.is_empty() && simplified != answer {
            candidates.insert(simplified);
        }
        if !answer.trim().is_empty() {
            candidates.insert(answer);
        }
    }

    candidates
}
