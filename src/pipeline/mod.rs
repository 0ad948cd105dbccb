//! Match pipeline abstractions
//!
//! This module runs scripted players against a [`GameSession`] for a fixed
//! number of rounds and reports progress and metrics through composable
//! observers.
//!
//! [`GameSession`]: crate::session::GameSession

pub mod matches;
pub mod observers;

pub use matches::{MatchConfig, MatchPipeline, MatchResult};
pub use observers::{CsvObserver, MetricsObserver, ProgressObserver};

pub use crate::ports::{Observer, Player};
