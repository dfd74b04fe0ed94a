//! Speech boundary and the backends the terminal game can use.
//!
//! A speak request is fire-and-forget: the backend later delivers exactly
//! one [`SpeechReport`] on the channel handed to it at construction. A stop
//! request silences the current utterance. Its report is either never sent
//! or, if it was already queued, rejected by [`SpeechController::is_current`]
//! when it is received.

use std::io::{Stdout, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::process::Command;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

/// How an utterance ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechEvent {
    Finished,
    Cancelled,
}

/// End of one utterance, tagged with the utterance it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeechReport {
    pub utterance: u64,
    pub event: SpeechEvent,
}

/// Plays phrases aloud.
pub trait SpeechController {
    /// Start speaking `text` with the voice for `locale_code`.
    fn speak(&mut self, text: &str, locale_code: &str);

    /// Stop the current utterance, if any. No event follows for it.
    fn stop(&mut self);

    /// Whether a report for `utterance` may still be acted on.
    ///
    /// False once the utterance was stopped or replaced; receivers drop
    /// such reports.
    fn is_current(&self, _utterance: u64) -> bool {
        true
    }
}

/// Tracks the utterance currently allowed to report its end.
#[derive(Debug, Clone, Default)]
struct UtteranceTracker {
    current: Arc<AtomicU64>,
}

impl UtteranceTracker {
    fn begin(&self) -> u64 {
        self.current.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn invalidate(&self) {
        self.current.fetch_add(1, Ordering::SeqCst);
    }

    fn is_current(&self, id: u64) -> bool {
        self.current.load(Ordering::SeqCst) == id
    }

    fn report(&self, id: u64, events: &mpsc::UnboundedSender<SpeechReport>, event: SpeechEvent) {
        if self.is_current(id) {
            let _ = events.send(SpeechReport {
                utterance: id,
                event,
            });
        } else {
            debug!(utterance = id, "Dropping event of stopped utterance");
        }
    }
}

/// Build the argument list for one utterance from a command template.
///
/// The template is split on whitespace before substitution, so a phrase
/// with spaces stays a single argument. Placeholders: `{text}`,
/// `{locale}` (e.g. "pt-BR") and `{lang}` (e.g. "pt").
pub fn expand_command(template: &str, text: &str, locale_code: &str) -> Vec<String> {
    let lang = locale_code
        .split('-')
        .next()
        .unwrap_or(locale_code)
        .to_ascii_lowercase();

    template
        .split_whitespace()
        .map(|part| {
            part.replace("{locale}", locale_code)
                .replace("{lang}", &lang)
                .replace("{text}", text)
        })
        .collect()
}

/// Speaks through an external synthesizer process such as `espeak-ng`.
pub struct CommandSpeech {
    template: String,
    events: mpsc::UnboundedSender<SpeechReport>,
    tracker: UtteranceTracker,
    cancel: Option<oneshot::Sender<()>>,
}

impl CommandSpeech {
    pub fn new(template: impl Into<String>, events: mpsc::UnboundedSender<SpeechReport>) -> Self {
        Self {
            template: template.into(),
            events,
            tracker: UtteranceTracker::default(),
            cancel: None,
        }
    }
}

impl SpeechController for CommandSpeech {
    fn speak(&mut self, text: &str, locale_code: &str) {
        self.stop();

        let id = self.tracker.begin();
        let args = expand_command(&self.template, text, locale_code);
        let events = self.events.clone();
        let tracker = self.tracker.clone();

        let Some((program, rest)) = args.split_first() else {
            warn!("Speech command template is empty");
            tracker.report(id, &events, SpeechEvent::Cancelled);
            return;
        };

        let mut child = match Command::new(program)
            .args(rest)
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .kill_on_drop(true)
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                warn!("Failed to start speech command '{}': {}", program, e);
                tracker.report(id, &events, SpeechEvent::Cancelled);
                return;
            }
        };

        debug!(utterance = id, locale = locale_code, "Speaking");

        let (cancel_tx, cancel_rx) = oneshot::channel();
        self.cancel = Some(cancel_tx);

        tokio::spawn(async move {
            tokio::select! {
                status = child.wait() => {
                    match status {
                        Ok(status) if status.success() => {
                            tracker.report(id, &events, SpeechEvent::Finished);
                        }
                        Ok(status) => {
                            warn!("Speech command exited with {}", status);
                            tracker.report(id, &events, SpeechEvent::Cancelled);
                        }
                        Err(e) => {
                            warn!("Failed to wait for speech command: {}", e);
                            tracker.report(id, &events, SpeechEvent::Cancelled);
                        }
                    }
                }
                _ = cancel_rx => {
                    let _ = child.kill().await;
                    debug!(utterance = id, "Speech stopped");
                }
            }
        });
    }

    fn stop(&mut self) {
        self.tracker.invalidate();
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
    }

    fn is_current(&self, utterance: u64) -> bool {
        self.tracker.is_current(utterance)
    }
}

/// Stand-in for a synthesizer: writes the phrase out and "finishes" after
/// a fixed delay.
pub struct TextSpeech<W = Stdout> {
    out: W,
    delay: Duration,
    events: mpsc::UnboundedSender<SpeechReport>,
    tracker: UtteranceTracker,
}

impl TextSpeech<Stdout> {
    pub fn new(delay: Duration, events: mpsc::UnboundedSender<SpeechReport>) -> Self {
        Self::with_writer(std::io::stdout(), delay, events)
    }
}

impl<W: Write> TextSpeech<W> {
    pub fn with_writer(
        out: W,
        delay: Duration,
        events: mpsc::UnboundedSender<SpeechReport>,
    ) -> Self {
        Self {
            out,
            delay,
            events,
            tracker: UtteranceTracker::default(),
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }
}

impl<W: Write> SpeechController for TextSpeech<W> {
    fn speak(&mut self, text: &str, locale_code: &str) {
        let id = self.tracker.begin();
        let _ = writeln!(self.out, "  (\u{1F50A} [{}]) \"{}\"", locale_code, text);
        let _ = self.out.flush();

        let events = self.events.clone();
        let tracker = self.tracker.clone();
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tracker.report(id, &events, SpeechEvent::Finished);
        });
    }

    fn stop(&mut self) {
        self.tracker.invalidate();
    }

    fn is_current(&self, utterance: u64) -> bool {
        self.tracker.is_current(utterance)
    }
}
