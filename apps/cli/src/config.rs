//! Environment configuration for the quiz front end.

use std::path::PathBuf;

use quiz_core::{DictionaryKind, MatchingMode, QuizSettings};
use thiserror::Error;

const DEFAULT_DICTIONARY: &str = "dictionary.json";
const DEFAULT_ROUNDS: u32 = 1;

/// Invalid configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("QUIZ_MATCHING_MODE must be 'exact' or 'fuzzy', got {0:?}")]
    MatchingMode(String),

    #[error("QUIZ_ROUNDS must be a positive integer, got {0:?}")]
    Rounds(String),
}

/// Quiz configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub dictionary_path: PathBuf,
    pub rounds: u32,
    pub settings: QuizSettings,
}

impl Config {
    /// Load configuration from `.env` and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let dictionary_path = lookup("QUIZ_DICTIONARY")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DICTIONARY.to_string())
            .into();

        let rounds = match lookup("QUIZ_ROUNDS") {
            Some(value) => value
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or(ConfigError::Rounds(value))?,
            None => DEFAULT_ROUNDS,
        };

        let matching_mode = match lookup("QUIZ_MATCHING_MODE") {
            Some(value) => MatchingMode::parse(&value.trim().to_lowercase())
                .ok_or(ConfigError::MatchingMode(value))?,
            None => MatchingMode::default(),
        };

        let dictionaries = lookup("QUIZ_DICTIONARIES")
            .and_then(|v| split_list(&v))
            .map(|names| names.into_iter().map(DictionaryKind::from).collect());
        let grades = lookup("QUIZ_GRADES").and_then(|v| split_list(&v));

        Ok(Self {
            dictionary_path,
            rounds,
            settings: QuizSettings {
                matching_mode,
                dictionaries,
                grades,
            },
        })
    }
}

/// Split a comma-separated list; blank lists mean "no filter".
fn split_list(value: &str) -> Option<Vec<String>> {
    let items: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect();
    (!items.is_empty()).then_some(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.dictionary_path, PathBuf::from("dictionary.json"));
        assert_eq!(config.rounds, 1);
        assert_eq!(config.settings, QuizSettings::default());
    }

    #[test]
    fn parses_filters() {
        let config = config(&[
            ("QUIZ_DICTIONARIES", "kanji, hiragana"),
            ("QUIZ_GRADES", "1,2,,"),
            ("QUIZ_MATCHING_MODE", "Exact"),
            ("QUIZ_ROUNDS", "5"),
        ])
        .unwrap();
        assert_eq!(
            config.settings.dictionaries,
            Some(vec![DictionaryKind::Kanji, DictionaryKind::Hiragana])
        );
        assert_eq!(
            config.settings.grades,
            Some(vec!["1".to_string(), "2".to_string()])
        );
        assert_eq!(config.settings.matching_mode, MatchingMode::Exact);
        assert_eq!(config.rounds, 5);
    }

    #[test]
    fn blank_filter_means_no_filter() {
        let config = config(&[("QUIZ_GRADES", " , ")]).unwrap();
        assert_eq!(config.settings.grades, None);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            config(&[("QUIZ_MATCHING_MODE", "loose")]),
            Err(ConfigError::MatchingMode(_))
        ));
        assert!(matches!(
            config(&[("QUIZ_ROUNDS", "0")]),
            Err(ConfigError::Rounds(_))
        ));
        assert!(matches!(
            config(&[("QUIZ_ROUNDS", "many")]),
            Err(ConfigError::Rounds(_))
        ));
    }
}
