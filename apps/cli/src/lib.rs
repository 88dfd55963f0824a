pub mod config;

use std::io::{BufRead, Write};

use anyhow::Context;
use quiz_core::{Dictionary, Question, QuizSession};
use rand::Rng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

pub fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Loading dictionary from {}", config.dictionary_path.display());
    let json = std::fs::read_to_string(&config.dictionary_path)
        .with_context(|| format!("reading {}", config.dictionary_path.display()))?;
    let dictionary = Dictionary::from_json(&json)?.filtered(&config.settings);
    tracing::info!("{} entries match the quiz preferences", dictionary.len());

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let session = run_quiz(
        &config,
        &dictionary,
        &mut rand::rng(),
        stdin.lock(),
        stdout.lock(),
    )?;

    tracing::info!(
        answered = session.answered(),
        correct = session.correct(),
        "quiz finished"
    );
    Ok(())
}

/// Ask `config.rounds` random questions, reading one answer line each.
///
/// End of input ends the quiz early; the unanswered question counts as
/// missing input.
pub fn run_quiz<R, I, O>(
    config: &Config,
    dictionary: &Dictionary,
    rng: &mut R,
    mut input: I,
    mut output: O,
) -> anyhow::Result<QuizSession>
where
    R: Rng + ?Sized,
    I: BufRead,
    O: Write,
{
    let mut session = QuizSession::new(config.settings.clone());

    for _ in 0..config.rounds {
        let question = dictionary.random_question(rng)?;
        ask(&question, &mut output)?;

        let mut line = String::new();
        let raw = match input.read_line(&mut line)? {
            0 => None,
            _ => Some(line.trim_end_matches(['\r', '\n'])),
        };

        let result = session.submit(&question, raw);
        if result.is_correct {
            writeln!(output, "Correct!")?;
        } else {
            writeln!(output, "Wrong. {}", question.display_answers())?;
            if let Some(url) = question.lookup_url() {
                writeln!(output, "See {}", url)?;
            }
        }

        if raw.is_none() {
            break;
        }
    }

    if let Some(accuracy) = session.accuracy() {
        writeln!(
            output,
            "{}/{} correct ({:.0}%)",
            session.correct(),
            session.answered(),
            accuracy * 100.0
        )?;
    }

    Ok(session)
}

fn ask<O: Write>(question: &Question, output: &mut O) -> std::io::Result<()> {
    writeln!(output, "{}", question.term)?;
    if let Some(hint) = question.hint() {
        writeln!(output, "({})", hint)?;
    }
    write!(output, "{} ", question.answer_kind.placeholder())?;
    output.flush()
}
