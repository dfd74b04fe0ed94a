//! Terminal front-end: turns typed lines and speech events into quiz events.
//!
//! Controls:
//! - enter (or `h`) taps the primary button
//! - `1`, `2`, `3` tap a flag
//! - any line dismisses an open result dialog
//! - `q` quits

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::config::{Config, SpeechBackend};
use crate::error::QuizError;
use crate::presentation::PresentationAdapter;
use crate::quiz::{Quiz, QuizEvent, Scoreboard};
use crate::selector::RandomSource;
use crate::speech::{CommandSpeech, SpeechController, SpeechReport, TextSpeech};

const PICK_HINT: &str = "Pick a flag with 1, 2 or 3.";
const USAGE_HINT: &str = "Press enter to hear the phrase, 1-3 to pick a flag, q to quit.";

/// One parsed line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Primary,
    Answer(usize),
    Quit,
    Unknown(String),
}

pub fn parse_input(line: &str) -> Input {
    let line = line.trim();
    match line.to_ascii_lowercase().as_str() {
        "" | "h" => Input::Primary,
        "q" | "quit" | "exit" => Input::Quit,
        other => match other.parse::<usize>() {
            Ok(number) if number >= 1 => Input::Answer(number - 1),
            _ => Input::Unknown(line.to_string()),
        },
    }
}

/// The speech backend selected by configuration.
pub enum ConfiguredSpeech {
    Command(CommandSpeech),
    Text(TextSpeech),
}

impl ConfiguredSpeech {
    pub fn from_config(config: &Config, events: mpsc::UnboundedSender<SpeechReport>) -> Self {
        match config.speech_backend {
            SpeechBackend::Command => {
                ConfiguredSpeech::Command(CommandSpeech::new(config.tts_command.clone(), events))
            }
            SpeechBackend::Text => {
                ConfiguredSpeech::Text(TextSpeech::new(config.text_speech_delay, events))
            }
        }
    }
}

impl SpeechController for ConfiguredSpeech {
    fn speak(&mut self, text: &str, locale_code: &str) {
        match self {
            ConfiguredSpeech::Command(speech) => speech.speak(text, locale_code),
            ConfiguredSpeech::Text(speech) => speech.speak(text, locale_code),
        }
    }

    fn stop(&mut self) {
        match self {
            ConfiguredSpeech::Command(speech) => speech.stop(),
            ConfiguredSpeech::Text(speech) => speech.stop(),
        }
    }

    fn is_current(&self, utterance: u64) -> bool {
        match self {
            ConfiguredSpeech::Command(speech) => speech.is_current(utterance),
            ConfiguredSpeech::Text(speech) => speech.is_current(utterance),
        }
    }
}

/// Apply one line of input. Returns `false` when the player quits.
pub fn dispatch<S, P, R>(quiz: &mut Quiz<S, P, R>, line: &str) -> Result<bool>
where
    S: SpeechController,
    P: PresentationAdapter,
    R: RandomSource,
{
    let input = parse_input(line);
    if input == Input::Quit {
        return Ok(false);
    }

    if quiz.pending_result().is_some() {
        quiz.handle(QuizEvent::ResultDismissed)?;
        return Ok(true);
    }

    match input {
        Input::Primary => quiz.handle(QuizEvent::HearPhrase)?,
        Input::Answer(slot) => match quiz.answer(slot) {
            Err(QuizError::InvalidSlot(_)) => quiz.hint(PICK_HINT),
            other => {
                other?;
            }
        },
        Input::Unknown(text) => {
            debug!(input = %text, "Unrecognized input");
            quiz.hint(USAGE_HINT);
        }
        Input::Quit => {}
    }
    Ok(true)
}

/// Run the quiz until the player quits or input ends.
pub async fn run<S, P, R, I>(
    quiz: &mut Quiz<S, P, R>,
    mut speech_events: mpsc::UnboundedReceiver<SpeechReport>,
    input: I,
) -> Result<Scoreboard>
where
    S: SpeechController,
    P: PresentationAdapter,
    R: RandomSource,
    I: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    quiz.handle(QuizEvent::Appeared)?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read player input")? else {
                    debug!("Input closed");
                    break;
                };
                if !dispatch(quiz, &line)? {
                    break;
                }
            }
            Some(report) = speech_events.recv() => {
                quiz.handle(QuizEvent::SpeechReported(report))?;
            }
        }
    }

    let score = quiz.score();
    info!(answered = score.answered, correct = score.correct, "Quiz finished");
    Ok(score)
}
