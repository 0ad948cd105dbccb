//! Adaptive Rock-Paper-Scissors engine
//!
//! This crate provides:
//! - A prediction engine that forecasts the player's next move from a small
//!   ensemble of predictors (frequency, Markov transitions, recent patterns
//!   and a meta-strategy detector) and plays the counter
//! - Game sessions with scoreboards and round logs
//! - Scripted players and a match pipeline for simulations
//! - MessagePack persistence of the full engine state
//!
//! # Examples
//!
//! ```
//! use roshambo::{EngineConfig, Move, PredictionEngine};
//!
//! let mut engine = PredictionEngine::new(EngineConfig::default().with_seed(1))?;
//! let engine_move = engine.get_move();
//! engine.observe(Move::Scissors);
//! assert_eq!(engine.total_moves(), 1);
//! # let _ = engine_move;
//! # Ok::<(), roshambo::Error>(())
//! ```

pub mod adapters;
pub mod app;
pub mod cli;
pub mod engine;
pub mod ensemble;
pub mod error;
pub mod history;
pub mod opponents;
pub mod persistence;
pub mod pipeline;
pub mod ports;
pub mod session;
pub mod types;

pub use engine::{EngineConfig, EnsembleWeights, PredictionEngine};
pub use ensemble::Prediction;
pub use error::{Error, Result};
pub use persistence::SavedEngine;
pub use session::{GameSession, RoundRecord, Scoreboard};
pub use types::{Move, MoveCounts, MoveMap, RoundOutcome, counter_move};
