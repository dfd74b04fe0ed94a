//! The quiz state machine.
//!
//! `Quiz` owns the current phase, the current round and the collaborators
//! it drives. Front-ends feed it events (taps, speech completion, dialog
//! dismissal) either through the named methods or through [`Quiz::handle`].

use tracing::{debug, info};

use crate::catalog::LanguageCatalog;
use crate::error::QuizError;
use crate::presentation::PresentationAdapter;
use crate::selector::{QuizRound, RandomSource, SLOT_COUNT};
use crate::speech::{SpeechController, SpeechEvent, SpeechReport};

/// Phase of the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    NoQuestionYet,
    ReadyToSpeak,
    PlayingAudio,
    QuestionDisplayed,
}

impl QuizState {
    /// Label of the primary button in this phase.
    pub fn primary_label(self) -> &'static str {
        match self {
            QuizState::NoQuestionYet => "Start Quiz",
            QuizState::ReadyToSpeak => "Hear Phrase",
            QuizState::QuestionDisplayed => "Hear Phrase Again",
            QuizState::PlayingAudio => "Stop",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

/// Judge a tapped slot against a round.
pub fn evaluate_answer(tapped_slot: usize, round: &QuizRound) -> Outcome {
    if tapped_slot == round.correct_slot {
        Outcome::Correct
    } else {
        Outcome::Incorrect
    }
}

/// Everything a front-end can tell the quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizEvent {
    /// The quiz screen became visible.
    Appeared,
    /// The primary button was tapped ("Hear Phrase" or "Stop").
    HearPhrase,
    /// The speech backend reported the end of an utterance.
    Speech(SpeechEvent),
    /// A tagged report from the speech channel; dropped if stale.
    SpeechReported(SpeechReport),
    /// A flag button was tapped.
    Answer(usize),
    /// The result dialog was dismissed.
    ResultDismissed,
}

/// Answered and correct rounds in this session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub answered: u32,
    pub correct: u32,
}

impl Scoreboard {
    fn record(&mut self, outcome: Outcome) {
        self.answered += 1;
        if outcome == Outcome::Correct {
            self.correct += 1;
        }
    }
}

pub struct Quiz<S, P, R> {
    catalog: LanguageCatalog,
    speech: S,
    presenter: P,
    random: R,
    state: QuizState,
    round: Option<QuizRound>,
    pending_result: Option<Outcome>,
    score: Scoreboard,
}

impl<S, P, R> Quiz<S, P, R>
where
    S: SpeechController,
    P: PresentationAdapter,
    R: RandomSource,
{
    /// Create a quiz over `catalog`.
    ///
    /// Fails when the catalog cannot fill a round, so the error surfaces at
    /// startup rather than on the first tap.
    pub fn new(
        catalog: LanguageCatalog,
        speech: S,
        presenter: P,
        random: R,
    ) -> Result<Self, QuizError> {
        if catalog.len() < SLOT_COUNT {
            return Err(QuizError::InsufficientCatalog {
                available: catalog.len(),
            });
        }

        Ok(Self {
            catalog,
            speech,
            presenter,
            random,
            state: QuizState::NoQuestionYet,
            round: None,
            pending_result: None,
            score: Scoreboard::default(),
        })
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn round(&self) -> Option<&QuizRound> {
        self.round.as_ref()
    }

    pub fn score(&self) -> Scoreboard {
        self.score
    }

    /// Outcome shown in the open result dialog, if any.
    pub fn pending_result(&self) -> Option<Outcome> {
        self.pending_result
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn speech(&self) -> &S {
        &self.speech
    }

    /// Dispatch a front-end event.
    pub fn handle(&mut self, event: QuizEvent) -> Result<(), QuizError> {
        match event {
            QuizEvent::Appeared => self.appear(),
            QuizEvent::HearPhrase => self.hear_phrase()?,
            QuizEvent::Speech(event) => self.speech_ended(event),
            QuizEvent::SpeechReported(report) => self.speech_reported(report),
            QuizEvent::Answer(slot) => {
                self.answer(slot)?;
            }
            QuizEvent::ResultDismissed => self.dismiss_result()?,
        }
        Ok(())
    }

    /// The quiz screen became visible: start over without a question.
    pub fn appear(&mut self) {
        self.set_state(QuizState::NoQuestionYet);
    }

    /// The primary button: start, stop or replay.
    pub fn hear_phrase(&mut self) -> Result<(), QuizError> {
        if self.pending_result.is_some() {
            debug!("Ignoring hear phrase while a result is shown");
            return Ok(());
        }

        match self.state {
            QuizState::PlayingAudio => {
                self.speech.stop();
                self.set_state(QuizState::ReadyToSpeak);
            }
            QuizState::NoQuestionYet => {
                self.start_round()?;
                self.speak_current();
            }
            QuizState::ReadyToSpeak | QuizState::QuestionDisplayed => {
                if self.round.is_none() {
                    self.start_round()?;
                }
                self.speak_current();
            }
        }
        Ok(())
    }

    /// The speech backend finished or cancelled an utterance.
    ///
    /// Both outcomes move to `QuestionDisplayed`, whatever the current state.
    pub fn speech_ended(&mut self, event: SpeechEvent) {
        debug!(?event, from = ?self.state, "Speech ended");
        self.set_state(QuizState::QuestionDisplayed);
    }

    /// A report read off the speech channel.
    ///
    /// Reports of a stopped or replaced utterance may still be queued when
    /// the stop happens; those are dropped here.
    pub fn speech_reported(&mut self, report: SpeechReport) {
        if !self.speech.is_current(report.utterance) {
            debug!(utterance = report.utterance, "Ignoring report of stopped utterance");
            return;
        }
        self.speech_ended(report.event);
    }

    /// Show a short help line to the player.
    pub fn hint(&mut self, text: &str) {
        self.presenter.show_hint(text);
    }

    /// A flag button was tapped.
    ///
    /// Returns `Ok(None)` when there is nothing to answer: no round yet, or
    /// a result dialog already open.
    pub fn answer(&mut self, tapped_slot: usize) -> Result<Option<Outcome>, QuizError> {
        if tapped_slot >= SLOT_COUNT {
            return Err(QuizError::InvalidSlot(tapped_slot));
        }
        if self.pending_result.is_some() {
            debug!(slot = tapped_slot, "Ignoring answer while a result is shown");
            return Ok(None);
        }
        if self.state == QuizState::NoQuestionYet {
            debug!(slot = tapped_slot, "Ignoring answer before the first question");
            return Ok(None);
        }
        let Some(round) = self.round.as_ref() else {
            debug!(slot = tapped_slot, "Ignoring answer without a round");
            return Ok(None);
        };

        let outcome = evaluate_answer(tapped_slot, round);
        let correct = round.correct;

        self.speech.stop();
        self.score.record(outcome);
        info!(
            ?outcome,
            answer = correct.name,
            answered = self.score.answered,
            correct = self.score.correct,
            "Round answered"
        );

        self.pending_result = Some(outcome);
        self.presenter.show_result(outcome, &correct);
        Ok(Some(outcome))
    }

    /// The result dialog was dismissed: set up the next round.
    pub fn dismiss_result(&mut self) -> Result<(), QuizError> {
        if self.pending_result.take().is_none() {
            debug!("No result dialog to dismiss");
            return Ok(());
        }

        self.set_state(QuizState::NoQuestionYet);
        self.start_round()?;
        Ok(())
    }

    /// Draw a new round and put its flags on the buttons.
    fn start_round(&mut self) -> Result<(), QuizError> {
        self.set_state(QuizState::ReadyToSpeak);

        let round = QuizRound::draw(self.catalog.languages(), &mut self.random)?;
        self.presenter.render_buttons(&round.slots());
        info!(language = round.correct.name, "New round");

        self.round = Some(round);
        Ok(())
    }

    fn speak_current(&mut self) {
        let Some(correct) = self.round.as_ref().map(|round| round.correct) else {
            return;
        };

        self.speech.stop();
        self.speech.speak(correct.phrase, correct.locale_code);
        self.set_state(QuizState::PlayingAudio);
    }

    fn set_state(&mut self, state: QuizState) {
        match state {
            QuizState::NoQuestionYet => self.presenter.set_flags_visible(false),
            QuizState::PlayingAudio => self.presenter.set_flags_visible(true),
            QuizState::ReadyToSpeak | QuizState::QuestionDisplayed => {}
        }
        self.presenter.set_primary_label(state.primary_label());
        self.state = state;
    }
}
