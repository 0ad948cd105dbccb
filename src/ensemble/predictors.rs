//! The four sub-predictors of the ensemble.
//!
//! Each returns `None` to abstain or a [`Vote`] for the player's next move.
//! Within a table, ties go to the earliest move in enumeration order.

use serde::{Deserialize, Serialize};

use crate::{
    engine::{EngineConfig, MoveSampler},
    history::{HistoryStore, MAX_PATTERN_LEN, MIN_PATTERN_LEN},
    types::{Move, MoveCounts},
};

/// A sub-predictor's forecast of the player's next move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    pub predicted: Move,
    /// 0 to 100
    pub confidence: f64,
}

impl Vote {
    fn from_counts(counts: &MoveCounts, total: u64) -> Option<Self> {
        if total == 0 {
            return None;
        }
        counts.argmax().map(|(predicted, count)| Vote {
            predicted,
            confidence: f64::from(count) / total as f64 * 100.0,
        })
    }
}

/// Identifies a sub-predictor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictorKind {
    Frequency,
    Markov,
    Pattern,
    Meta,
}

impl PredictorKind {
    pub const ALL: [PredictorKind; 4] = [
        PredictorKind::Frequency,
        PredictorKind::Markov,
        PredictorKind::Pattern,
        PredictorKind::Meta,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PredictorKind::Frequency => "frequency",
            PredictorKind::Markov => "markov",
            PredictorKind::Pattern => "pattern",
            PredictorKind::Meta => "meta",
        }
    }
}

/// Most frequent move overall.
pub fn frequency(history: &HistoryStore) -> Option<Vote> {
    Vote::from_counts(history.frequencies(), history.total_moves())
}

/// Most frequent successor of the last observed move.
pub fn markov(history: &HistoryStore) -> Option<Vote> {
    let row = history.transitions_from(history.last_move()?);
    Vote::from_counts(row, u64::from(row.total()))
}

/// Most frequent successor of the longest matching recent pattern.
///
/// Lengths are tried from 4 down to 2 and the first one present in the
/// pattern table wins, even if a shorter pattern has more observations.
pub fn pattern(history: &HistoryStore) -> Option<Vote> {
    (MIN_PATTERN_LEN..=MAX_PATTERN_LEN).rev().find_map(|len| {
        let key = history.tail_key(len)?;
        let followers = history.patterns().get(&key)?;
        Vote::from_counts(followers, u64::from(followers.total()))
    })
}

/// Deliberately noisy vote when the player keeps beating the prediction.
///
/// Draws from `sampler` only when it votes.
pub fn meta(
    history: &HistoryStore,
    config: &EngineConfig,
    sampler: &mut MoveSampler,
) -> Option<Vote> {
    let total = history.total_moves();
    if total < config.meta_min_moves || total == 0 {
        return None;
    }
    let counter_rate = history.counter_attempts() as f64 / total as f64;
    (counter_rate > config.meta_counter_threshold).then(|| Vote {
        predicted: sampler.sample(),
        confidence: config.meta_confidence,
    })
}
