//! # Random Sources
//!
//! The only consumer of randomness is the resource-saver bonus loop in
//! crafting. The source is injected into each [`Player`](crate::Player) so
//! simulations are reproducible from a seed and tests can script exact
//! draw sequences.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A stream of uniform draws in `[0, 1)`.
pub trait RandomSource {
    /// Returns the next draw.
    fn next_unit(&mut self) -> f64;
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Seeded ChaCha8 draws. Same seed, same sequence.
#[derive(Clone, Debug)]
pub struct SeededRolls {
    rng: ChaCha8Rng,
}

impl SeededRolls {
    /// Creates a source from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRolls {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed sequence of draws.
///
/// Once the sequence runs out every draw is `1.0`, which never beats a
/// probability, so any roll loop stops.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRolls {
    draws: VecDeque<f64>,
}

impl ScriptedRolls {
    /// Creates a source that yields `draws` in order.
    #[must_use]
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
        }
    }

    /// Draws not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl RandomSource for ScriptedRolls {
    fn next_unit(&mut self) -> f64 {
        self.draws.pop_front().unwrap_or(1.0)
    }
}
