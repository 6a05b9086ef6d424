//! Randomness seam.
//!
//! Engines that need chance (memory game steps, riddle button shuffle) take
//! a `&mut dyn RandomSource` instead of reaching for a global generator, so
//! tests can feed them exact values.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait RandomSource {
    /// Uniform value in `0..upper`. `upper` is always at least 1.
    fn below(&mut self, upper: u32) -> u32;
}

/// Default source: a seedable `StdRng`.
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded from OS entropy, for real play.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn below(&mut self, upper: u32) -> u32 {
        if upper <= 1 {
            return 0;
        }
        self.rng.gen_range(0..upper)
    }
}

/// Replays a fixed list of values, cycling when exhausted. Values are
/// reduced modulo the requested bound.
pub struct ScriptedRandom {
    values: Vec<u32>,
    pos: usize,
}

impl ScriptedRandom {
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, pos: 0 }
    }
}

impl RandomSource for ScriptedRandom {
    fn below(&mut self, upper: u32) -> u32 {
        if self.values.is_empty() || upper <= 1 {
            return 0;
        }
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        v % upper
    }
}

/// Fisher-Yates shuffle driven by a [`RandomSource`].
pub fn shuffle<T>(items: &mut [T], rng: &mut dyn RandomSource) {
    for i in (1..items.len()).rev() {
        let j = rng.below(i as u32 + 1) as usize;
        items.swap(i, j);
    }
}
