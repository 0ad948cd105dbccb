//! Prediction engine
//!
//! [`PredictionEngine`] ties the [`HistoryStore`] and the prediction ensemble
//! together behind the call surface a game host uses each round:
//!
//! 1. [`PredictionEngine::get_move`] to obtain the engine's play,
//! 2. resolve the round,
//! 3. [`PredictionEngine::observe`] with the player's actual move.
//!
//! `get_move` must come first: `observe` compares the new move against the
//! prediction made for that round to detect counter-attempts.
//!
//! # Examples
//!
//! ```
//! use roshambo::{EngineConfig, Move, PredictionEngine};
//!
//! let mut engine = PredictionEngine::new(EngineConfig::default().with_seed(7))?;
//! for _ in 0..6 {
//!     let _engine_move = engine.get_move();
//!     engine.observe(Move::Rock);
//! }
//! assert_eq!(engine.get_move(), Move::Paper);
//! assert!(engine.confidence() >= 90);
//! # Ok::<(), roshambo::Error>(())
//! ```

pub mod config;
pub mod sampler;

use serde::{Deserialize, Serialize};

pub use config::{EngineConfig, EnsembleWeights};
pub use sampler::MoveSampler;

use crate::{
    Error, Result,
    ensemble::{self, Prediction, PredictionState},
    history::{HistoryStore, PatternSummary},
    types::{Move, MoveMap},
};

/// Number of moves returned by [`PredictionEngine::recent`].
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Number of patterns returned by [`PredictionEngine::top_patterns`].
pub const DEFAULT_PATTERN_LIMIT: usize = 5;

/// Adaptive opponent that forecasts the player's next move and counters it.
///
/// All state is private to the instance; use one engine per game session.
/// The serialized form captures the configuration, every table, the retained
/// prediction and the position of the random stream, so a restored engine
/// makes the same choices as the original for the same subsequent inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionEngine {
    config: EngineConfig,
    history: HistoryStore,
    prediction: PredictionState,
    sampler: MoveSampler,
}

impl PredictionEngine {
    /// Create an empty engine.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails [`EngineConfig::validate`].
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            history: HistoryStore::new(config.history_capacity),
            prediction: PredictionState::default(),
            sampler: MoveSampler::new(config.seed),
            config,
        })
    }

    /// Forecast the player's next move and retain it as the last prediction.
    pub fn predict(&mut self) -> Prediction {
        let prediction = ensemble::predict(&self.history, &self.config, &mut self.sampler);
        self.prediction.record(&prediction);
        prediction
    }

    /// The engine's play for this round: the counter to the predicted move.
    pub fn get_move(&mut self) -> Move {
        self.predict().engine_move()
    }

    /// Register the player's realized move for the round.
    pub fn observe(&mut self, mv: Move) {
        self.history.observe(mv, self.prediction.last_prediction);
    }

    /// Forget everything learned and rewind the random stream.
    ///
    /// Afterwards the engine is indistinguishable from a freshly constructed
    /// one with the same configuration and seed.
    pub fn reset(&mut self) {
        self.history.reset();
        self.prediction.clear();
        self.sampler.reset();
        log::info!("engine reset (seed {})", self.sampler.seed());
    }

    /// Share of each move among all observed moves, in percent.
    pub fn tendencies(&self) -> MoveMap<f64> {
        self.history.tendencies()
    }

    /// Row-normalized transition percentages, indexed `[previous][next]`.
    pub fn transition_matrix(&self) -> MoveMap<MoveMap<f64>> {
        self.history.transition_matrix()
    }

    pub fn patterns_summary(&self, limit: usize) -> Vec<PatternSummary> {
        self.history.patterns_summary(limit)
    }

    pub fn top_patterns(&self) -> Vec<PatternSummary> {
        self.patterns_summary(DEFAULT_PATTERN_LIMIT)
    }

    /// Last computed confidence rounded to an integer in 0..=100.
    pub fn confidence(&self) -> u8 {
        self.prediction.last_confidence.round().clamp(0.0, 100.0) as u8
    }

    pub fn last_prediction(&self) -> Option<Move> {
        self.prediction.last_prediction
    }

    pub fn last_confidence(&self) -> f64 {
        self.prediction.last_confidence
    }

    pub fn recent_history(&self, n: usize) -> Vec<Move> {
        self.history.recent_history(n)
    }

    pub fn recent(&self) -> Vec<Move> {
        self.recent_history(DEFAULT_RECENT_LIMIT)
    }

    pub fn total_moves(&self) -> u64 {
        self.history.total_moves()
    }

    pub fn counter_attempts(&self) -> u64 {
        self.history.counter_attempts()
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Seed of the engine's random stream, also when none was configured.
    pub fn seed(&self) -> u64 {
        self.sampler.seed()
    }

    /// Check the configuration and that the history tables agree with it.
    pub fn validate(&self) -> Result<()> {
        self.config.validate()?;
        self.history.validate(self.config.history_capacity)
    }

    /// Serialize the full engine state to MessagePack.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        rmp_serde::to_vec(self).map_err(|e| Error::SerializationContext {
            operation: "serialize engine to MessagePack".to_string(),
            message: e.to_string(),
        })
    }

    /// Restore an engine serialized with [`PredictionEngine::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let engine: Self =
            rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
                operation: "deserialize engine from MessagePack".to_string(),
                message: e.to_string(),
            })?;
        engine.validate()?;
        Ok(engine)
    }
}
