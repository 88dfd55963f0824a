//! Core types for the kanji quiz.

use crate::dictionary::DictionaryEntry;
use crate::error::{QuizError, Result};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

const KANJI_LOOKUP_URL: &str = "http://jisho.org/kanji/details/";

/// Dictionary a question was drawn from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DictionaryKind {
    Kanji,
    Hiragana,
    Katakana,
    Other(String),
}

impl DictionaryKind {
    /// Get the dictionary name as a string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Kanji => "kanji",
            Self::Hiragana => "hiragana",
            Self::Katakana => "katakana",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for DictionaryKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            "kanji" => Self::Kanji,
            "hiragana" => Self::Hiragana,
            "katakana" => Self::Katakana,
            _ => Self::Other(name),
        }
    }
}

impl From<&str> for DictionaryKind {
    fn from(name: &str) -> Self {
        Self::from(name.to_string())
    }
}

impl From<DictionaryKind> for String {
    fn from(kind: DictionaryKind) -> Self {
        match kind {
            DictionaryKind::Other(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl Default for DictionaryKind {
    fn default() -> Self {
        Self::Kanji
    }
}

/// Which glosses of a question count as the answer key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerKind {
    Meanings,
    Readings,
}

impl AnswerKind {
    /// Prompt shown in an empty answer field.
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Meanings => "type the meaning...",
            Self::Readings => "type the reading...",
        }
    }
}

/// A single quiz question: a term plus the glosses that answer it.
///
/// The answer key is resolved once on construction. Meanings win when both
/// meanings and readings exist; the readings are then only a hint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DictionaryEntry")]
pub struct Question {
    pub term: String,
    pub dictionary: DictionaryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meanings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readings: Option<Vec<String>>,
    pub answer_kind: AnswerKind,
}

impl Question {
    /// Create a question, rejecting empty terms and questions without answers.
    pub fn new(
        term: impl Into<String>,
        dictionary: DictionaryKind,
        meanings: Option<Vec<String>>,
        readings: Option<Vec<String>>,
    ) -> Result<Self> {
        let term = term.into();
        if term.trim().is_empty() {
            return Err(QuizError::InvalidTerm { term });
        }

        let meanings = meanings.filter(|m| !m.is_empty());
        let readings = readings.filter(|r| !r.is_empty());

        let answer_kind = match (&meanings, &readings) {
            (Some(_), _) => AnswerKind::Meanings,
            (None, Some(_)) => AnswerKind::Readings,
            (None, None) => return Err(QuizError::NoAnswers { term }),
        };

        Ok(Self {
            term,
            dictionary,
            meanings,
            readings,
            answer_kind,
        })
    }

    /// Shorthand for a kanji question answered by its meanings.
    pub fn kanji<S: Into<String>>(term: &str, meanings: impl IntoIterator<Item = S>) -> Result<Self> {
        let meanings = meanings.into_iter().map(Into::into).collect();
        Self::new(term, DictionaryKind::Kanji, Some(meanings), None)
    }

    /// Glosses accepted as the answer.
    pub fn correct_answers(&self) -> &[String] {
        let answers = match self.answer_kind {
            AnswerKind::Meanings => self.meanings.as_deref(),
            AnswerKind::Readings => self.readings.as_deref(),
        };
        answers.unwrap_or_default()
    }

    /// Readings to display alongside the term when meanings are asked for.
    pub fn hint(&self) -> Option<String> {
        match (self.answer_kind, &self.readings) {
            (AnswerKind::Meanings, Some(readings)) => Some(readings.join(", ")),
            _ => None,
        }
    }

    /// Accepted glosses formatted for display after a wrong answer.
    pub fn display_answers(&self) -> String {
        self.correct_answers().join(", ")
    }

    /// Dictionary lookup page for kanji terms.
    pub fn lookup_url(&self) -> Option<String> {
        if self.dictionary != DictionaryKind::Kanji {
            return None;
        }
        Some(format!(
            "{}{}",
            KANJI_LOOKUP_URL,
            utf8_percent_encode(&self.term, NON_ALPHANUMERIC)
        ))
    }
}

impl TryFrom<DictionaryEntry> for Question {
    type Error = QuizError;

    fn try_from(entry: DictionaryEntry) -> Result<Self> {
        Self::new(
            entry.term,
            entry.dictionary.unwrap_or_default(),
            entry.meanings,
            entry.readings,
        )
    }
}

/// Matching mode for typed answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingMode {
    Exact,
    Fuzzy,
}

impl Default for MatchingMode {
    fn default() -> Self {
        Self::Fuzzy
    }
}

impl MatchingMode {
    /// Get the mode name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Fuzzy => "fuzzy",
        }
    }

    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "exact" => Some(Self::Exact),
            "fuzzy" => Some(Self::Fuzzy),
            _ => None,
        }
    }
}

/// Quiz preferences: how answers are matched and which entries are asked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuizSettings {
    #[serde(default)]
    pub matching_mode: MatchingMode,
    /// Only ask entries from these dictionaries. `None` means all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dictionaries: Option<Vec<DictionaryKind>>,
    /// Only ask entries of these grades. `None` means all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grades: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Option<Vec<String>> {
        Some(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn meanings_take_priority_over_readings() {
        let q = Question::new("年", DictionaryKind::Kanji, strings(&["year"]), strings(&["ねん", "とし"]))
            .unwrap();
        assert_eq!(q.answer_kind, AnswerKind::Meanings);
        assert_eq!(q.correct_answers(), ["year"]);
        assert_eq!(q.hint().as_deref(), Some("ねん, とし"));
    }

    #[test]
    fn readings_used_when_no_meanings() {
        let q = Question::new("あ", DictionaryKind::Hiragana, None, strings(&["a"])).unwrap();
        assert_eq!(q.answer_kind, AnswerKind::Readings);
        assert_eq!(q.correct_answers(), ["a"]);
        assert_eq!(q.hint(), None);
        assert_eq!(q.answer_kind.placeholder(), "type the reading...");
    }

    #[test]
    fn empty_meanings_fall_back_to_readings() {
        let q = Question::new("ア", DictionaryKind::Katakana, Some(vec![]), strings(&["a"])).unwrap();
        assert_eq!(q.answer_kind, AnswerKind::Readings);
        assert_eq!(q.meanings, None);
    }

    #[test]
    fn reject_question_without_answers() {
        let result = Question::new("年", DictionaryKind::Kanji, Some(vec![]), None);
        assert!(matches!(result, Err(QuizError::NoAnswers { .. })));
    }

    #[test]
    fn reject_blank_term() {
        let result = Question::kanji("  ", ["year"]);
        assert!(matches!(result, Err(QuizError::InvalidTerm { .. })));
    }

    #[test]
    fn display_answers_joins_glosses() {
        let q = Question::kanji("火", ["fire", "flame"]).unwrap();
        assert_eq!(q.display_answers(), "fire, flame");
        assert_eq!(q.answer_kind.placeholder(), "type the meaning...");
    }

    #[test]
    fn lookup_url_only_for_kanji() {
        let q = Question::kanji("火", ["fire"]).unwrap();
        assert_eq!(
            q.lookup_url().as_deref(),
            Some("http://jisho.org/kanji/details/%E7%81%AB")
        );

        let q = Question::new("あ", DictionaryKind::Hiragana, None, strings(&["a"])).unwrap();
        assert_eq!(q.lookup_url(), None);
    }

    #[test]
    fn dictionary_kind_round_trips_unknown_names() {
        assert_eq!(DictionaryKind::from("kanji"), DictionaryKind::Kanji);
        assert_eq!(
            DictionaryKind::from("jlpt-n5"),
            DictionaryKind::Other("jlpt-n5".to_string())
        );
        assert_eq!(String::from(DictionaryKind::Other("x".into())), "x");
    }

    #[test]
    fn question_deserializes_through_validation() {
        let q: Question =
            serde_json::from_str(r#"{"term":"火","dictionary":"kanji","meanings":["fire"]}"#).unwrap();
        assert_eq!(q.answer_kind, AnswerKind::Meanings);

        let bad = serde_json::from_str::<Question>(r#"{"term":"火"}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn matching_mode_parse() {
        assert_eq!(MatchingMode::parse("exact"), Some(MatchingMode::Exact));
        assert_eq!(MatchingMode::parse("fuzzy"), Some(MatchingMode::Fuzzy));
        assert_eq!(MatchingMode::parse("loose"), None);
        assert_eq!(MatchingMode::default(), MatchingMode::Fuzzy);
    }
}
