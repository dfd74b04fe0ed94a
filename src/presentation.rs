//! Presentation boundary: everything the quiz shows to the player.

use std::io::Write;

use crate::catalog::Language;
use crate::quiz::Outcome;

/// Renders quiz state. Implemented by the front-end.
pub trait PresentationAdapter {
    /// Show the three flag buttons, in on-screen order.
    fn render_buttons(&mut self, slots: &[Language; 3]);

    /// Update the label of the primary "hear phrase" button.
    fn set_primary_label(&mut self, label: &str);

    fn set_flags_visible(&mut self, visible: bool);

    /// Present the outcome of an answered round. The dialog stays up until
    /// the front-end reports its dismissal back to the quiz.
    fn show_result(&mut self, outcome: Outcome, correct: &Language);

    /// Show a one-line help or input error message.
    fn show_hint(&mut self, text: &str);
}

/// Line-oriented presenter for a terminal.
///
/// Write errors are ignored: a closed stdout leaves nothing to report to.
pub struct ConsolePresenter<W: Write> {
    out: W,
    slots: Option<[Language; 3]>,
    flags_visible: bool,
}

impl<W: Write> ConsolePresenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            slots: None,
            flags_visible: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn print_flags(&mut self) {
        if !self.flags_visible {
            return;
        }
        if let Some(slots) = self.slots {
            for (index, lang) in slots.iter().enumerate() {
                let _ = writeln!(self.out, "  [{}] {} ({})", index + 1, lang.name, lang.flag_id);
            }
        }
    }
}

impl<W: Write> PresentationAdapter for ConsolePresenter<W> {
    fn render_buttons(&mut self, slots: &[Language; 3]) {
        self.slots = Some(*slots);
        self.print_flags();
    }

    fn set_primary_label(&mut self, label: &str) {
        let _ = writeln!(self.out, "> {} [enter]", label);
        let _ = self.out.flush();
    }

    fn set_flags_visible(&mut self, visible: bool) {
        let was_visible = self.flags_visible;
        self.flags_visible = visible;
        if visible && !was_visible {
            self.print_flags();
        }
    }

    fn show_result(&mut self, outcome: Outcome, correct: &Language) {
        let message = match outcome {
            Outcome::Correct => format!("Correct! That was {}.", correct.name),
            Outcome::Incorrect => format!("Incorrect. That was {}.", correct.name),
        };
        let _ = writeln!(self.out, "\n*** {} ***", message);
        let _ = writeln!(self.out, "> OK [enter]");
        let _ = self.out.flush();
    }

    fn show_hint(&mut self, text: &str) {
        let _ = writeln!(self.out, "  {}", text);
        let _ = self.out.flush();
    }
}
