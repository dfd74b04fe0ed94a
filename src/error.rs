use thiserror::Error;

/// Errors raised by the quiz core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// A round needs one correct answer and two distractors.
    #[error("catalog has {available} languages, at least 3 are needed for a round")]
    InsufficientCatalog { available: usize },

    /// An answer slot outside the three flag buttons.
    #[error("answer slot {0} is out of range (expected 0, 1 or 2)")]
    InvalidSlot(usize),
}
