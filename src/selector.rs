//! Random draws for a quiz round.
//!
//! A round needs one correct language, two distractors and the slot the
//! correct flag is shown in. All randomness goes through [`RandomSource`] so
//! a session can be seeded and tests can script the exact picks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::catalog::Language;
use crate::error::QuizError;

/// Number of flag buttons on screen.
pub const SLOT_COUNT: usize = 3;

/// A source of uniformly distributed indices.
pub trait RandomSource {
    /// Return an index in `0..upper`. `upper` is never zero.
    fn index_below(&mut self, upper: usize) -> usize;
}

/// [`RandomSource`] backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R = StdRng> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Deterministic source; the same seed replays the same session.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn index_below(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper)
    }
}

/// Draw three distinct languages. The first one is the correct answer.
///
/// Sampling is without replacement: each pick removes the language from a
/// working copy of the catalog, so no language is drawn twice.
pub fn draw_three<S>(catalog: &[Language], source: &mut S) -> Result<[Language; 3], QuizError>
where
    S: RandomSource + ?Sized,
{
    if catalog.len() < SLOT_COUNT {
        return Err(QuizError::InsufficientCatalog {
            available: catalog.len(),
        });
    }

    let mut remaining = catalog.to_vec();
    let mut picks = [catalog[0]; SLOT_COUNT];
    for pick in picks.iter_mut() {
        let index = source.index_below(remaining.len());
        *pick = remaining.remove(index);
    }

    Ok(picks)
}

/// Choose the slot (0, 1 or 2) the correct flag is shown in.
pub fn choose_slot<S>(source: &mut S) -> usize
where
    S: RandomSource + ?Sized,
{
    source.index_below(SLOT_COUNT)
}

/// One question: the correct language, two distractors and where the
/// correct flag sits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizRound {
    pub correct: Language,
    pub distractors: [Language; 2],
    pub correct_slot: usize,
}

impl QuizRound {
    /// Draw a fresh round: slot first, then the three languages.
    pub fn draw<S>(catalog: &[Language], source: &mut S) -> Result<Self, QuizError>
    where
        S: RandomSource + ?Sized,
    {
        let correct_slot = choose_slot(source);
        let [correct, first, second] = draw_three(catalog, source)?;

        debug!(
            correct = correct.name,
            slot = correct_slot,
            "Placed correct answer"
        );

        Ok(Self {
            correct,
            distractors: [first, second],
            correct_slot,
        })
    }

    /// Languages in on-screen order.
    ///
    /// The correct language trades places with whatever would otherwise
    /// occupy its slot in `[correct, first distractor, second distractor]`.
    pub fn slots(&self) -> [Language; 3] {
        let mut slots = [self.correct, self.distractors[0], self.distractors[1]];
        slots.swap(0, self.correct_slot);
        slots
    }
}
