use anyhow::{bail, Context, Result};
use std::time::Duration;

pub const DEFAULT_TTS_COMMAND: &str = "espeak-ng -v {lang} {text}";

/// Which speech backend the game uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechBackend {
    /// External synthesizer process
    Command,
    /// Print the phrase instead of speaking it
    Text,
}

impl SpeechBackend {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "command" => Ok(SpeechBackend::Command),
            "text" => Ok(SpeechBackend::Text),
            other => bail!("Unknown speech backend '{}' (expected 'command' or 'text')", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Speech
    pub speech_backend: SpeechBackend,
    pub tts_command: String,
    pub text_speech_delay: Duration,

    // Randomness
    pub seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            speech_backend: match std::env::var("SPEECH_BACKEND") {
                Ok(value) => SpeechBackend::parse(&value).context("Invalid SPEECH_BACKEND")?,
                Err(_) => SpeechBackend::Command,
            },
            tts_command: std::env::var("TTS_COMMAND")
                .unwrap_or_else(|_| DEFAULT_TTS_COMMAND.to_string()),
            text_speech_delay: Duration::from_millis(
                std::env::var("TEXT_SPEECH_DELAY_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(1500),
            ),

            seed: std::env::var("QUIZ_SEED")
                .ok()
                .map(|v| v.trim().parse::<u64>())
                .transpose()
                .context("QUIZ_SEED must be an unsigned integer")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 4] = [
        "SPEECH_BACKEND",
        "TTS_COMMAND",
        "TEXT_SPEECH_DELAY_MS",
        "QUIZ_SEED",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();

        let config = Config::from_env().expect("Should load defaults");
        assert_eq!(config.speech_backend, SpeechBackend::Command);
        assert_eq!(config.tts_command, DEFAULT_TTS_COMMAND);
        assert_eq!(config.text_speech_delay, Duration::from_millis(1500));
        assert_eq!(config.seed, None);
    }

    #[test]
    #[serial]
    fn test_overrides() {
        clear_env();
        std::env::set_var("SPEECH_BACKEND", "Text");
        std::env::set_var("TTS_COMMAND", "say {text}");
        std::env::set_var("TEXT_SPEECH_DELAY_MS", "250");
        std::env::set_var("QUIZ_SEED", "42");

        let config = Config::from_env().expect("Should load overrides");
        clear_env();

        assert_eq!(config.speech_backend, SpeechBackend::Text);
        assert_eq!(config.tts_command, "say {text}");
        assert_eq!(config.text_speech_delay, Duration::from_millis(250));
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    #[serial]
    fn test_invalid_delay_falls_back_to_default() {
        clear_env();
        std::env::set_var("TEXT_SPEECH_DELAY_MS", "soon");

        let config = Config::from_env().expect("Should load");
        clear_env();

        assert_eq!(config.text_speech_delay, Duration::from_millis(1500));
    }

    #[test]
    #[serial]
    fn test_unknown_backend_is_error() {
        clear_env();
        std::env::set_var("SPEECH_BACKEND", "telepathy");

        let result = Config::from_env();
        clear_env();

        let err = result.unwrap_err();
        assert!(format!("{:#}", err).contains("telepathy"));
    }

    #[test]
    #[serial]
    fn test_invalid_seed_is_error() {
        clear_env();
        std::env::set_var("QUIZ_SEED", "-1");

        let result = Config::from_env();
        clear_env();

        assert!(result.is_err());
    }
}
