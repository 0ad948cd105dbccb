//! Scripted players used to exercise the engine in simulations.

use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng,
    distr::{Distribution, weighted::WeightedIndex},
    random,
    rngs::StdRng,
};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    ports::Player,
    session::RoundRecord,
    types::{Move, MoveMap},
};

/// Always plays the same move.
pub struct ConstantPlayer {
    name: String,
    mv: Move,
}

impl ConstantPlayer {
    pub fn new(mv: Move) -> Self {
        Self {
            name: format!("constant-{mv}"),
            mv,
        }
    }
}

impl Player for ConstantPlayer {
    fn choose(&mut self, _rounds: &[RoundRecord]) -> Move {
        self.mv
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Plays rock, paper, scissors, rock, ... in order.
///
/// Each move beats the previous one, so against an engine expecting
/// repetition every round is a counter-attempt.
#[derive(Default)]
pub struct CyclePlayer;

impl Player for CyclePlayer {
    fn choose(&mut self, rounds: &[RoundRecord]) -> Move {
        Move::ALL[rounds.len() % Move::ALL.len()]
    }

    fn name(&self) -> &str {
        "cycle"
    }
}

/// Uniformly random baseline.
pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new() -> Self {
        Self {
            rng: StdRng::seed_from_u64(random()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for RandomPlayer {
    fn choose(&mut self, _rounds: &[RoundRecord]) -> Move {
        Move::ALL[self.rng.random_range(0..Move::ALL.len())]
    }

    fn name(&self) -> &str {
        "random"
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}

/// Random player with a fixed preference for some moves.
pub struct BiasedPlayer {
    distribution: WeightedIndex<f64>,
    rng: StdRng,
}

impl BiasedPlayer {
    /// Create a biased player.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWeight`] if a weight is negative or not finite,
    /// and [`Error::InvalidConfiguration`] if all weights are zero.
    pub fn new(weights: MoveMap<f64>) -> Result<Self> {
        for (mv, &value) in weights.iter() {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::InvalidWeight {
                    name: mv.name().to_string(),
                    value,
                });
            }
        }
        let distribution =
            WeightedIndex::new(weights.values()).map_err(|e| Error::InvalidConfiguration {
                message: format!("biased player weights: {e}"),
            })?;
        Ok(Self {
            distribution,
            rng: StdRng::seed_from_u64(random()),
        })
    }

    /// Half rock, 30% paper, 20% scissors.
    pub fn rock_heavy() -> Result<Self> {
        Self::new(MoveMap::from_fn(|mv| match mv {
            Move::Rock => 0.5,
            Move::Paper => 0.3,
            Move::Scissors => 0.2,
        }))
    }
}

impl Player for BiasedPlayer {
    fn choose(&mut self, _rounds: &[RoundRecord]) -> Move {
        Move::ALL[self.distribution.sample(&mut self.rng)]
    }

    fn name(&self) -> &str {
        "biased"
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}

/// Plays whatever beats the engine's previous move.
#[derive(Default)]
pub struct BeatLastPlayer;

impl Player for BeatLastPlayer {
    fn choose(&mut self, rounds: &[RoundRecord]) -> Move {
        rounds
            .last()
            .map_or(Move::Rock, |last| last.engine_move.counter())
    }

    fn name(&self) -> &str {
        "beat-last"
    }
}

/// Copies the engine's previous move.
#[derive(Default)]
pub struct MirrorPlayer;

impl Player for MirrorPlayer {
    fn choose(&mut self, rounds: &[RoundRecord]) -> Move {
        rounds.last().map_or(Move::Rock, |last| last.engine_move)
    }

    fn name(&self) -> &str {
        "mirror"
    }
}

/// Scripted player selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlayerKind {
    Constant(Move),
    Cycle,
    Random,
    Biased,
    BeatLast,
    Mirror,
}

impl PlayerKind {
    const EXPECTED: &'static str =
        "rock, paper, scissors, cycle, random, biased, beat-last, mirror";

    /// Instantiate the player, seeding it when `seed` is given.
    pub fn build(self, seed: Option<u64>) -> Result<Box<dyn Player>> {
        let mut player: Box<dyn Player> = match self {
            PlayerKind::Constant(mv) => Box::new(ConstantPlayer::new(mv)),
            PlayerKind::Cycle => Box::new(CyclePlayer),
            PlayerKind::Random => Box::new(RandomPlayer::new()),
            PlayerKind::Biased => Box::new(BiasedPlayer::rock_heavy()?),
            PlayerKind::BeatLast => Box::new(BeatLastPlayer),
            PlayerKind::Mirror => Box::new(MirrorPlayer),
        };
        if let Some(seed) = seed {
            player.set_rng_seed(seed)?;
        }
        Ok(player)
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerKind::Constant(mv) => write!(f, "{mv}"),
            PlayerKind::Cycle => f.write_str("cycle"),
            PlayerKind::Random => f.write_str("random"),
            PlayerKind::Biased => f.write_str("biased"),
            PlayerKind::BeatLast => f.write_str("beat-last"),
            PlayerKind::Mirror => f.write_str("mirror"),
        }
    }
}

impl FromStr for PlayerKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cycle" => Ok(PlayerKind::Cycle),
            "random" => Ok(PlayerKind::Random),
            "biased" => Ok(PlayerKind::Biased),
            "beat-last" | "beat_last" => Ok(PlayerKind::BeatLast),
            "mirror" => Ok(PlayerKind::Mirror),
            other => other
                .parse::<Move>()
                .map(PlayerKind::Constant)
                .map_err(|_| Error::ParseOpponent {
                    input: s.to_string(),
                    expected: Self::EXPECTED.to_string(),
                }),
        }
    }
}
