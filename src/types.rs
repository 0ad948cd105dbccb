//! Core domain types: moves, per-move maps and round outcomes.

use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::Error;

/// One of the three Rock-Paper-Scissors symbols.
///
/// The declaration order (rock, paper, scissors) is the enumeration order used
/// for every tie-break in the prediction ensemble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    /// All moves in enumeration order.
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    /// Position of this move in [`Move::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Move::Rock => 0,
            Move::Paper => 1,
            Move::Scissors => 2,
        }
    }

    /// Look up a move by its enumeration index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMoveIndex`] if `index` is not 0, 1 or 2.
    pub fn from_index(index: usize) -> Result<Self, Error> {
        Move::ALL
            .get(index)
            .copied()
            .ok_or(Error::InvalidMoveIndex { index })
    }

    /// The unique move that defeats `self`.
    pub const fn counter(self) -> Move {
        match self {
            Move::Rock => Move::Paper,
            Move::Paper => Move::Scissors,
            Move::Scissors => Move::Rock,
        }
    }

    /// Whether `self` defeats `other`.
    pub fn beats(self, other: Move) -> bool {
        other.counter() == self
    }

    /// Lowercase display name.
    pub fn name(self) -> &'static str {
        match self {
            Move::Rock => "rock",
            Move::Paper => "paper",
            Move::Scissors => "scissors",
        }
    }

    /// Single-letter label used in compact history strings.
    pub fn symbol(self) -> char {
        match self {
            Move::Rock => 'R',
            Move::Paper => 'P',
            Move::Scissors => 'S',
        }
    }
}

/// The move that defeats `mv`.
pub const fn counter_move(mv: Move) -> Move {
    mv.counter()
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Move {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rock" | "r" => Ok(Move::Rock),
            "paper" | "p" => Ok(Move::Paper),
            "scissors" | "s" => Ok(Move::Scissors),
            _ => Err(Error::InvalidMove {
                input: s.to_string(),
            }),
        }
    }
}

/// Format a move sequence as a compact string such as `RPS`.
pub fn format_moves(moves: &[Move]) -> String {
    moves.iter().map(|mv| mv.symbol()).collect()
}

/// A fixed map from each [`Move`] to a value, stored in enumeration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoveMap<T>([T; 3]);

impl<T> MoveMap<T> {
    /// Build a map from a function of each move.
    pub fn from_fn(mut f: impl FnMut(Move) -> T) -> Self {
        MoveMap([f(Move::Rock), f(Move::Paper), f(Move::Scissors)])
    }

    /// Iterate `(move, &value)` pairs in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (Move, &T)> {
        Move::ALL.into_iter().zip(self.0.iter())
    }

    /// Values in enumeration order.
    pub fn values(&self) -> &[T; 3] {
        &self.0
    }
}

impl<T: Copy> MoveMap<T> {
    /// A map holding `value` for every move.
    pub fn splat(value: T) -> Self {
        MoveMap([value; 3])
    }
}

impl<T> Index<Move> for MoveMap<T> {
    type Output = T;

    fn index(&self, mv: Move) -> &T {
        &self.0[mv.index()]
    }
}

impl<T> IndexMut<Move> for MoveMap<T> {
    fn index_mut(&mut self, mv: Move) -> &mut T {
        &mut self.0[mv.index()]
    }
}

/// Per-move observation counts.
pub type MoveCounts = MoveMap<u32>;

impl MoveCounts {
    /// Sum of all counts.
    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    /// Increment the count of `mv`.
    pub fn increment(&mut self, mv: Move) {
        self[mv] += 1;
    }

    /// The move with the strictly highest count, scanning in enumeration order.
    ///
    /// Ties keep the earliest move. Returns `None` when every count is zero.
    pub fn argmax(&self) -> Option<(Move, u32)> {
        let mut best: Option<(Move, u32)> = None;
        for (mv, &count) in self.iter() {
            if count > best.map_or(0, |(_, c)| c) {
                best = Some((mv, count));
            }
        }
        best
    }

    /// Counts converted to percentages of the total; all zero when empty.
    pub fn percentages(&self) -> MoveMap<f64> {
        let total = self.total();
        if total == 0 {
            return MoveMap::splat(0.0);
        }
        MoveMap::from_fn(|mv| f64::from(self[mv]) / f64::from(total) * 100.0)
    }
}

/// Result of a single round from the player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundOutcome {
    PlayerWin,
    EngineWin,
    Draw,
}

impl RoundOutcome {
    /// Resolve a round given both moves.
    pub fn resolve(player: Move, engine: Move) -> Self {
        if player == engine {
            RoundOutcome::Draw
        } else if player.beats(engine) {
            RoundOutcome::PlayerWin
        } else {
            RoundOutcome::EngineWin
        }
    }

    /// Short label for tables and CSV output.
    pub fn label(self) -> &'static str {
        match self {
            RoundOutcome::PlayerWin => "player",
            RoundOutcome::EngineWin => "engine",
            RoundOutcome::Draw => "draw",
        }
    }
}

impl fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
