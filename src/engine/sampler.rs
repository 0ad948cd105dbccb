//! Seeded, position-addressable source of uniformly random moves.

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::types::Move;

/// Odd multiplier spreading consecutive draw indices across the seed space.
const DRAW_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Uniform move sampler whose position in the random stream survives
/// serialization.
///
/// Draw `n` comes from a generator keyed on `(seed, n)`, so the state is just
/// the seed and the number of draws made. Restoring never replays earlier
/// draws, and any decoded `draws` value is a valid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveSampler {
    seed: u64,
    draws: u64,
}

impl MoveSampler {
    /// Sampler seeded with `seed`, or with a fresh random seed when `None`.
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| rand::rng().random());
        Self { seed, draws: 0 }
    }

    /// Draw one move uniformly at random.
    pub fn sample(&mut self) -> Move {
        let mut rng = StdRng::seed_from_u64(self.seed ^ self.draws.wrapping_mul(DRAW_STRIDE));
        self.draws = self.draws.wrapping_add(1);
        Move::ALL[rng.random_range(0..Move::ALL.len())]
    }

    /// Rewind to the start of the stream for the same seed.
    pub fn reset(&mut self) {
        self.draws = 0;
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn draws(&self) -> u64 {
        self.draws
    }
}
