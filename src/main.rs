use anyhow::{Context, Result};
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tracing::info;

use geo_quiz::catalog::LanguageCatalog;
use geo_quiz::config::Config;
use geo_quiz::console::{self, ConfiguredSpeech};
use geo_quiz::presentation::ConsolePresenter;
use geo_quiz::quiz::Quiz;
use geo_quiz::selector::RngSource;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Logs go to stderr; stdout is the game screen
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("geo_quiz=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    info!(backend = ?config.speech_backend, seed = ?config.seed, "Starting quiz");

    let random = match config.seed {
        Some(seed) => RngSource::seeded(seed),
        None => RngSource::from_entropy(),
    };

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let speech = ConfiguredSpeech::from_config(&config, events_tx);
    let presenter = ConsolePresenter::new(std::io::stdout());

    let mut quiz = Quiz::new(LanguageCatalog::get().clone(), speech, presenter, random)
        .context("Failed to set up the quiz")?;

    println!("Geo Quiz: listen to the phrase and pick the flag of its language.");
    println!("Enter plays or stops the phrase, 1-3 picks a flag, q quits.\n");

    let score = console::run(&mut quiz, events_rx, BufReader::new(tokio::io::stdin())).await?;

    println!("\nYou got {} of {} right.", score.correct, score.answered);
    Ok(())
}
