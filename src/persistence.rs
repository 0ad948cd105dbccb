//! Saved engine format
//!
//! Wraps a [`PredictionEngine`] with a format version and the scoreboard of
//! the session it came from, so a game can be resumed later.

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    engine::PredictionEngine,
    session::{GameSession, Scoreboard},
};

/// Serializable snapshot of a game in progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedEngine {
    /// Version of the save format (for future compatibility)
    pub version: u32,
    /// Complete engine state, tables and random stream included
    pub engine: PredictionEngine,
    /// Cumulative score across all sessions played with this engine
    pub scoreboard: Scoreboard,
    /// Name of the last opponent, when saved from a simulation
    pub opponent: Option<String>,
}

impl SavedEngine {
    /// Current save format version
    pub const VERSION: u32 = 1;

    pub fn new(engine: PredictionEngine, scoreboard: Scoreboard) -> Self {
        Self {
            version: Self::VERSION,
            engine,
            scoreboard,
            opponent: None,
        }
    }

    /// Snapshot a running session.
    pub fn from_session(session: &GameSession) -> Self {
        Self::new(session.engine().clone(), *session.scoreboard())
    }

    pub fn with_opponent(mut self, opponent: impl Into<String>) -> Self {
        self.opponent = Some(opponent.into());
        self
    }

    /// Reject snapshots written by an incompatible format version.
    pub fn check_version(&self) -> Result<()> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedVersion {
                found: self.version,
                expected: Self::VERSION,
            });
        }
        Ok(())
    }

    /// Reject incompatible versions and engines whose state does not add up.
    pub fn validate(&self) -> Result<()> {
        self.check_version()?;
        self.engine.validate()
    }

    /// Resume the saved game.
    pub fn into_session(self) -> Result<GameSession> {
        self.validate()?;
        Ok(GameSession::with_scoreboard(self.engine, self.scoreboard))
    }
}
