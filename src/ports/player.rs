//! Player port - abstraction for whoever plays against the engine

use crate::{Result, session::RoundRecord, types::Move};

/// Something that chooses player moves against the prediction engine.
///
/// A human at the terminal is driven directly by the CLI; this trait covers
/// scripted opponents used by simulations and tests.
///
/// # Examples
///
/// ```no_run
/// use roshambo::{Move, ports::Player, session::RoundRecord};
///
/// struct AlwaysRock;
///
/// impl Player for AlwaysRock {
///     fn choose(&mut self, _rounds: &[RoundRecord]) -> Move {
///         Move::Rock
///     }
///
///     fn name(&self) -> &str {
///         "always-rock"
///     }
/// }
/// ```
pub trait Player: Send {
    /// Choose the move for the next round.
    ///
    /// `rounds` holds every round of the current match so far, oldest first,
    /// including the engine's moves.
    fn choose(&mut self, rounds: &[RoundRecord]) -> Move;

    /// Get the player's name.
    ///
    /// Used for identification in match summaries and logging.
    fn name(&self) -> &str;

    /// Seed the player's internal random number generator.
    ///
    /// Match pipelines call this when supplied with a deterministic seed.
    /// Deterministic players can ignore it.
    ///
    /// # Default Implementation
    ///
    /// Does nothing and returns `Ok(())`.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }
}
