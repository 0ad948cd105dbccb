//! Common test utilities for the roshambo test suite.

#![allow(dead_code)]

use rand::{Rng, SeedableRng, rngs::StdRng};
use roshambo::{EngineConfig, Move, PredictionEngine};

/// Engine with a fixed seed.
pub fn seeded_engine(seed: u64) -> PredictionEngine {
    PredictionEngine::new(EngineConfig::default().with_seed(seed)).unwrap()
}

/// Reproducible uniformly random move sequence.
pub fn random_moves(seed: u64, len: usize) -> Vec<Move> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len)
        .map(|_| Move::ALL[rng.random_range(0..Move::ALL.len())])
        .collect()
}

/// Play `moves` through the engine, asking for its move before each one.
pub fn play(engine: &mut PredictionEngine, moves: &[Move]) {
    for &mv in moves {
        engine.get_move();
        engine.observe(mv);
    }
}
