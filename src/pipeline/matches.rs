//! Match pipeline: a scripted player against the prediction engine

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::{Observer, Player},
    session::{GameSession, RoundRecord},
    types::RoundOutcome,
};

/// Match configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Number of rounds to play
    pub rounds: usize,

    /// Seed handed to the player (the engine carries its own)
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            rounds: 200,
            seed: None,
        }
    }
}

/// Result of a match, counted over the rounds of this match only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    /// Name of the scripted player
    pub opponent: String,

    /// Rounds played
    pub rounds: usize,

    pub engine_wins: usize,
    pub player_wins: usize,
    pub draws: usize,

    /// Engine wins / rounds
    pub engine_win_rate: f64,

    /// Fraction of rounds where the predicted move was the player's move
    pub prediction_accuracy: f64,

    /// Mean prediction confidence (0 to 100)
    pub mean_confidence: f64,
}

impl MatchResult {
    /// Summarize the given rounds
    pub fn from_rounds(opponent: &str, rounds: &[RoundRecord]) -> Self {
        let count = |outcome: RoundOutcome| rounds.iter().filter(|r| r.outcome == outcome).count();
        let total = rounds.len();
        let fraction = |n: usize| if total > 0 { n as f64 / total as f64 } else { 0.0 };

        let engine_wins = count(RoundOutcome::EngineWin);
        let hits = rounds.iter().filter(|r| r.prediction_hit()).count();
        let mean_confidence = if total > 0 {
            rounds.iter().map(|r| r.confidence).sum::<f64>() / total as f64
        } else {
            0.0
        };

        Self {
            opponent: opponent.to_string(),
            rounds: total,
            engine_wins,
            player_wins: count(RoundOutcome::PlayerWin),
            draws: count(RoundOutcome::Draw),
            engine_win_rate: fraction(engine_wins),
            prediction_accuracy: fraction(hits),
            mean_confidence,
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Plays a scripted player against a session for a fixed number of rounds
pub struct MatchPipeline {
    config: MatchConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl MatchPipeline {
    /// Create a new match pipeline
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run the match
    ///
    /// The player only sees rounds from this match, even when the session
    /// already holds earlier rounds.
    pub fn run(&mut self, session: &mut GameSession, player: &mut dyn Player) -> Result<MatchResult> {
        if let Some(seed) = self.config.seed {
            player.set_rng_seed(seed)?;
        }

        log::info!(
            "starting match: {} rounds against {}",
            self.config.rounds,
            player.name()
        );
        for observer in &mut self.observers {
            observer.on_match_start(self.config.rounds)?;
        }

        let start = session.rounds().len();
        for _ in 0..self.config.rounds {
            let player_move = player.choose(&session.rounds()[start..]);
            let record = session.play_round(player_move);
            for observer in &mut self.observers {
                observer.on_round(&record, session.scoreboard())?;
            }
        }

        for observer in &mut self.observers {
            observer.on_match_end(session.scoreboard())?;
        }

        let result = MatchResult::from_rounds(player.name(), &session.rounds()[start..]);
        log::info!(
            "match against {} finished: engine won {}/{} ({:.1}% predictions correct)",
            result.opponent,
            result.engine_wins,
            result.rounds,
            result.prediction_accuracy * 100.0
        );
        Ok(result)
    }
}
