//! Game session: one engine, a running scoreboard and the round log.

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    engine::{EngineConfig, PredictionEngine},
    types::{Move, RoundOutcome},
};

/// Everything that happened in one round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// 1-based round number
    pub round: usize,
    pub player_move: Move,
    pub engine_move: Move,
    /// What the engine expected the player to play
    pub predicted: Move,
    /// Confidence of that prediction (0 to 100)
    pub confidence: f64,
    pub outcome: RoundOutcome,
}

impl RoundRecord {
    /// Whether the engine guessed the player's move correctly.
    pub fn prediction_hit(&self) -> bool {
        self.predicted == self.player_move
    }
}

/// Running tally of round outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub rounds: usize,
    pub player_wins: usize,
    pub engine_wins: usize,
    pub draws: usize,
    /// Consecutive engine wins up to the latest round
    pub engine_streak: usize,
    pub longest_engine_streak: usize,
}

impl Scoreboard {
    pub fn record(&mut self, outcome: RoundOutcome) {
        self.rounds += 1;
        match outcome {
            RoundOutcome::PlayerWin => {
                self.player_wins += 1;
                self.engine_streak = 0;
            }
            RoundOutcome::EngineWin => {
                self.engine_wins += 1;
                self.engine_streak += 1;
                self.longest_engine_streak = self.longest_engine_streak.max(self.engine_streak);
            }
            RoundOutcome::Draw => {
                self.draws += 1;
                self.engine_streak = 0;
            }
        }
    }

    pub fn engine_win_rate(&self) -> f64 {
        rate(self.engine_wins, self.rounds)
    }

    pub fn player_win_rate(&self) -> f64 {
        rate(self.player_wins, self.rounds)
    }

    pub fn draw_rate(&self) -> f64 {
        rate(self.draws, self.rounds)
    }
}

fn rate(count: usize, total: usize) -> f64 {
    if total > 0 {
        count as f64 / total as f64
    } else {
        0.0
    }
}

/// A game between a player and a [`PredictionEngine`].
///
/// # Examples
///
/// ```
/// use roshambo::{EngineConfig, GameSession, Move};
///
/// let mut session = GameSession::new(EngineConfig::default().with_seed(1))?;
/// let record = session.play_round(Move::Rock);
/// assert_eq!(record.round, 1);
/// assert_eq!(session.scoreboard().rounds, 1);
/// # Ok::<(), roshambo::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    engine: PredictionEngine,
    scoreboard: Scoreboard,
    rounds: Vec<RoundRecord>,
}

impl GameSession {
    pub fn new(config: EngineConfig) -> Result<Self> {
        Ok(Self::from_engine(PredictionEngine::new(config)?))
    }

    /// Start a session around an existing (possibly restored) engine.
    pub fn from_engine(engine: PredictionEngine) -> Self {
        Self::with_scoreboard(engine, Scoreboard::default())
    }

    pub fn with_scoreboard(engine: PredictionEngine, scoreboard: Scoreboard) -> Self {
        Self {
            engine,
            scoreboard,
            rounds: Vec::new(),
        }
    }

    /// Play one round against `player_move`.
    ///
    /// The engine commits to its move before it is shown the player's move.
    pub fn play_round(&mut self, player_move: Move) -> RoundRecord {
        let prediction = self.engine.predict();
        let engine_move = prediction.engine_move();
        let outcome = RoundOutcome::resolve(player_move, engine_move);

        self.scoreboard.record(outcome);
        self.engine.observe(player_move);

        let record = RoundRecord {
            round: self.scoreboard.rounds,
            player_move,
            engine_move,
            predicted: prediction.predicted,
            confidence: prediction.confidence,
            outcome,
        };
        self.rounds.push(record);
        record
    }

    /// Clear the engine, the scoreboard and the round log.
    pub fn reset(&mut self) {
        self.engine.reset();
        self.scoreboard = Scoreboard::default();
        self.rounds.clear();
    }

    pub fn engine(&self) -> &PredictionEngine {
        &self.engine
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// Rounds played in this session (not including rounds restored with a
    /// saved scoreboard).
    pub fn rounds(&self) -> &[RoundRecord] {
        &self.rounds
    }

    pub fn into_engine(self) -> PredictionEngine {
        self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Move::{Paper, Rock};

    fn session(seed: u64) -> GameSession {
        GameSession::new(EngineConfig::default().with_seed(seed)).unwrap()
    }

    #[test]
    fn test_scoreboard_counts_and_streaks() {
        let mut board = Scoreboard::default();
        for outcome in [
            RoundOutcome::EngineWin,
            RoundOutcome::EngineWin,
            RoundOutcome::Draw,
            RoundOutcome::EngineWin,
            RoundOutcome::PlayerWin,
        ] {
            board.record(outcome);
        }
        assert_eq!(board.rounds, 5);
        assert_eq!(board.engine_wins, 3);
        assert_eq!(board.player_wins, 1);
        assert_eq!(board.draws, 1);
        assert_eq!(board.engine_streak, 0);
        assert_eq!(board.longest_engine_streak, 2);
        assert!((board.engine_win_rate() - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_empty_scoreboard_rates_are_zero() {
        let board = Scoreboard::default();
        assert_eq!(board.engine_win_rate(), 0.0);
        assert_eq!(board.player_win_rate(), 0.0);
        assert_eq!(board.draw_rate(), 0.0);
    }

    #[test]
    fn test_play_round_records_consistent_outcome() {
        let mut session = session(8);
        for (i, mv) in [Rock, Paper, Rock, Rock].into_iter().enumerate() {
            let record = session.play_round(mv);
            assert_eq!(record.round, i + 1);
            assert_eq!(record.engine_move, record.predicted.counter());
            assert_eq!(record.outcome, RoundOutcome::resolve(mv, record.engine_move));
        }
        assert_eq!(session.engine().total_moves(), 4);
        assert_eq!(session.rounds().len(), 4);
    }

    #[test]
    fn test_engine_beats_constant_player() {
        let mut session = session(9);
        for _ in 0..40 {
            session.play_round(Rock);
        }
        let last = session.rounds().last().unwrap();
        assert_eq!(last.engine_move, Paper);
        assert!(session.scoreboard().engine_wins >= 34);
    }

    #[test]
    fn test_reset_clears_session() {
        let mut session = session(10);
        session.play_round(Rock);
        session.reset();
        assert_eq!(*session.scoreboard(), Scoreboard::default());
        assert!(session.rounds().is_empty());
        assert_eq!(session.engine().total_moves(), 0);
    }
}
