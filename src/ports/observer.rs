//! Observer port - abstraction for match observation and data collection

use crate::{
    Result,
    session::{RoundRecord, Scoreboard},
};

/// Observer trait for monitoring matches
///
/// Observers can be composed to collect different types of data while a
/// match runs: progress bars, running metrics, CSV round logs.
///
/// # Event Sequence
///
/// 1. `on_match_start(total_rounds)` - Once at the beginning
/// 2. `on_round(record, scoreboard)` - After every round
/// 3. `on_match_end(scoreboard)` - Once at the end
///
/// # Examples
///
/// ```no_run
/// use roshambo::{ports::Observer, session::{RoundRecord, Scoreboard}};
///
/// struct HitCounter {
///     hits: usize,
/// }
///
/// impl Observer for HitCounter {
///     fn on_round(&mut self, record: &RoundRecord, _scoreboard: &Scoreboard) -> roshambo::Result<()> {
///         if record.prediction_hit() {
///             self.hits += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called when a match starts.
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to initialize observation state.
    fn on_match_start(&mut self, _total_rounds: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each round has been resolved and observed by the engine.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn on_round(&mut self, _record: &RoundRecord, _scoreboard: &Scoreboard) -> Result<()> {
        Ok(())
    }

    /// Called when the match completes.
    ///
    /// Use this to finalize outputs, flush files, or display summaries.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn on_match_end(&mut self, _scoreboard: &Scoreboard) -> Result<()> {
        Ok(())
    }
}
