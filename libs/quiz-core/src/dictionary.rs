//! Dictionary data the questions are drawn from.
//!
//! # Format
//! A JSON array of entries as produced by the dictionary generator:
//! ```json
//! [
//!   {"term": "年", "dictionary": "kanji", "grade": "1",
//!    "meanings": ["year"], "readings": ["ねん", "とし"]}
//! ]
//! ```

use crate::error::{QuizError, Result};
use crate::types::{DictionaryKind, Question, QuizSettings};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};

/// Raw dictionary entry, before validation into a [`Question`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub term: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dictionary: Option<DictionaryKind>,
    #[serde(
        default,
        deserialize_with = "grade_as_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub grade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meanings: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readings: Option<Vec<String>>,
}

impl DictionaryEntry {
    fn allowed_by(&self, settings: &QuizSettings) -> bool {
        if let (Some(kind), Some(allowed)) = (&self.dictionary, &settings.dictionaries) {
            if !allowed.contains(kind) {
                return false;
            }
        }
        if let (Some(grade), Some(allowed)) = (&self.grade, &settings.grades) {
            if !allowed.contains(grade) {
                return false;
            }
        }
        true
    }
}

/// Grades appear both as strings and as bare numbers in generated files.
fn grade_as_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Grade {
        Text(String),
        Number(u32),
    }

    Ok(Option::<Grade>::deserialize(deserializer)?.map(|grade| match grade {
        Grade::Text(text) => text,
        Grade::Number(number) => number.to_string(),
    }))
}

/// An in-memory list of dictionary entries.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: Vec<DictionaryEntry>,
}

impl Dictionary {
    pub fn new(entries: Vec<DictionaryEntry>) -> Self {
        Self { entries }
    }

    /// Parse a dictionary from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<DictionaryEntry> = serde_json::from_str(json)?;
        Ok(Self::new(entries))
    }

    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keep only the entries the quiz settings allow.
    ///
    /// Entries without a dictionary name or grade are never filtered out on
    /// that field.
    pub fn filtered(&self, settings: &QuizSettings) -> Self {
        let entries: Vec<_> = self
            .entries
            .iter()
            .filter(|entry| entry.allowed_by(settings))
            .cloned()
            .collect();

        tracing::debug!(
            before = self.entries.len(),
            after = entries.len(),
            "filtered dictionary"
        );

        Self::new(entries)
    }

    /// Pick a uniformly random entry and turn it into a question.
    pub fn random_question<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Question> {
        let entry = self
            .entries
            .choose(rng)
            .ok_or(QuizError::EmptyDictionary)?;
        Question::try_from(entry.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AnswerKind;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SAMPLE: &str = r#"[
        {"term": "年", "dictionary": "kanji", "grade": "1", "meanings": ["year"], "readings": ["ねん", "とし"]},
        {"term": "火", "dictionary": "kanji", "grade": 1, "meanings": ["fire", "flame"]},
        {"term": "秒", "dictionary": "kanji", "grade": "3", "meanings": ["a second (1/60 minute)"]},
        {"term": "あ", "dictionary": "hiragana", "readings": ["a"]},
        {"term": "ア", "dictionary": "katakana", "readings": ["a"]}
    ]"#;

    fn settings(dictionaries: Option<&[&str]>, grades: Option<&[&str]>) -> QuizSettings {
        QuizSettings {
            dictionaries: dictionaries.map(|d| d.iter().map(|&name| DictionaryKind::from(name)).collect()),
            grades: grades.map(|g| g.iter().map(|s| s.to_string()).collect()),
            ..QuizSettings::default()
        }
    }

    #[test]
    fn parse_sample() {
        let dictionary = Dictionary::from_json(SAMPLE).unwrap();
        assert_eq!(dictionary.len(), 5);
        assert_eq!(dictionary.entries()[1].grade.as_deref(), Some("1"));
        assert_eq!(dictionary.entries()[3].dictionary, Some(DictionaryKind::Hiragana));
        assert_eq!(dictionary.entries()[3].meanings, None);
    }

    #[test]
    fn reject_non_array() {
        let result = Dictionary::from_json(r#"{"term": "年"}"#);
        assert!(matches!(result, Err(QuizError::BadDictionary(_))));
    }

    #[test]
    fn filter_by_dictionary() {
        let dictionary = Dictionary::from_json(SAMPLE).unwrap();
        let filtered = dictionary.filtered(&settings(Some(&["hiragana", "katakana"][..]), None));
        let terms: Vec<_> = filtered.entries().iter().map(|e| e.term.as_str()).collect();
        assert_eq!(terms, vec!["あ", "ア"]);
    }

    #[test]
    fn filter_by_grade_keeps_ungraded_entries() {
        let dictionary = Dictionary::from_json(SAMPLE).unwrap();
        let filtered = dictionary.filtered(&settings(None, Some(&["1"][..])));
        let terms: Vec<_> = filtered.entries().iter().map(|e| e.term.as_str()).collect();
        assert_eq!(terms, vec!["年", "火", "あ", "ア"]);
    }

    #[test]
    fn no_filters_keep_everything() {
        let dictionary = Dictionary::from_json(SAMPLE).unwrap();
        assert_eq!(dictionary.filtered(&QuizSettings::default()).len(), 5);
    }

    #[test]
    fn random_question_from_empty_dictionary() {
        let mut rng = StdRng::seed_from_u64(7);
        let result = Dictionary::default().random_question(&mut rng);
        assert!(matches!(result, Err(QuizError::EmptyDictionary)));
    }

    #[test]
    fn random_question_is_validated() {
        let dictionary = Dictionary::from_json(SAMPLE).unwrap();
        let kana = dictionary.filtered(&settings(Some(&["hiragana"][..]), None));
        let mut rng = StdRng::seed_from_u64(7);
        let question = kana.random_question(&mut rng).unwrap();
        assert_eq!(question.term, "あ");
        assert_eq!(question.answer_kind, AnswerKind::Readings);
    }

    #[test]
    fn random_question_rejects_entry_without_answers() {
        let dictionary = Dictionary::from_json(r#"[{"term": "〇"}]"#).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let result = dictionary.random_question(&mut rng);
        assert!(matches!(result, Err(QuizError::NoAnswers { .. })));
    }
}
