//! Prediction ensemble
//!
//! Fuses four sub-predictors into one forecast of the player's next move:
//!
//! | predictor | signal | default weight |
//! |-----------|--------|----------------|
//! | frequency | most common move overall | 0.2 |
//! | markov | most common successor of the last move | 0.4 |
//! | pattern | successor of the longest recent 2-4 move pattern | 0.3 |
//! | meta | random move once the player counters the engine often | 0.1 |
//!
//! Until `cold_start_threshold` moves have been observed the ensemble does
//! not consult the predictors at all and guesses uniformly.

pub mod predictors;

use serde::{Deserialize, Serialize};

pub use predictors::{PredictorKind, Vote};

use crate::{
    engine::{EngineConfig, MoveSampler},
    history::HistoryStore,
    types::{Move, MoveMap},
};

/// Which branch of the ensemble produced a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    ColdStart,
    Warm,
}

/// Individual sub-predictor votes; `None` means the predictor abstained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictorVotes {
    pub frequency: Option<Vote>,
    pub markov: Option<Vote>,
    pub pattern: Option<Vote>,
    pub meta: Option<Vote>,
}

impl PredictorVotes {
    pub fn get(&self, kind: PredictorKind) -> Option<Vote> {
        match kind {
            PredictorKind::Frequency => self.frequency,
            PredictorKind::Markov => self.markov,
            PredictorKind::Pattern => self.pattern,
            PredictorKind::Meta => self.meta,
        }
    }
}

/// Forecast of the player's next move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub predicted: Move,
    /// 0 to 100
    pub confidence: f64,
    pub regime: Regime,
    pub votes: PredictorVotes,
}

impl Prediction {
    /// The move the engine plays against this prediction.
    pub fn engine_move(&self) -> Move {
        self.predicted.counter()
    }
}

/// Last prediction retained between rounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionState {
    pub last_prediction: Option<Move>,
    pub last_confidence: f64,
}

impl PredictionState {
    pub fn record(&mut self, prediction: &Prediction) {
        self.last_prediction = Some(prediction.predicted);
        self.last_confidence = prediction.confidence;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Forecast the player's next move from `history`.
///
/// Random draws (cold start and meta votes) come from `sampler`.
pub fn predict(
    history: &HistoryStore,
    config: &EngineConfig,
    sampler: &mut MoveSampler,
) -> Prediction {
    if history.total_moves() < config.cold_start_threshold {
        let prediction = Prediction {
            predicted: sampler.sample(),
            confidence: config.cold_start_confidence,
            regime: Regime::ColdStart,
            votes: PredictorVotes::default(),
        };
        log::debug!(
            "cold start ({} < {}): guessing {}",
            history.total_moves(),
            config.cold_start_threshold,
            prediction.predicted
        );
        return prediction;
    }

    let votes = PredictorVotes {
        frequency: predictors::frequency(history),
        markov: predictors::markov(history),
        pattern: predictors::pattern(history),
        meta: predictors::meta(history, config, sampler),
    };
    let (predicted, confidence) = combine(&votes, config);

    log::debug!("votes {votes:?} -> {predicted} ({confidence:.1})");

    Prediction {
        predicted,
        confidence,
        regime: Regime::Warm,
        votes,
    }
}

/// Weighted vote of the sub-predictors.
///
/// Scores are scanned rock, paper, scissors and only a strictly greater score
/// replaces the running best, so rock wins when every score is zero. The
/// confidence is the winner's share of the total score, or the cold-start
/// confidence when nothing scored.
pub fn combine(votes: &PredictorVotes, config: &EngineConfig) -> (Move, f64) {
    let weights = &config.weights;
    let mut scores = MoveMap::splat(0.0_f64);
    for kind in PredictorKind::ALL {
        let Some(vote) = votes.get(kind) else {
            continue;
        };
        let weight = match kind {
            PredictorKind::Frequency => weights.frequency,
            PredictorKind::Markov => weights.markov,
            PredictorKind::Pattern => weights.pattern,
            PredictorKind::Meta => weights.meta,
        };
        scores[vote.predicted] += weight * vote.confidence;
    }

    let mut best = Move::Rock;
    let mut best_score = 0.0;
    for (mv, &score) in scores.iter() {
        if score > best_score {
            best = mv;
            best_score = score;
        }
    }

    let total: f64 = scores.values().iter().sum();
    let confidence = if total > 0.0 {
        (best_score / total * 100.0).min(100.0)
    } else {
        config.cold_start_confidence
    };
    (best, confidence)
}
