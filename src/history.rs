//! Bounded move history and the counters derived from it.
//!
//! The [`HistoryStore`] owns every table the predictors read: per-move
//! frequencies, first-order transitions, n-gram patterns of length 2 to 4 and
//! the counter-attempt tally. All derived updates read the history *before*
//! the new move is appended.

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    types::{Move, MoveCounts, MoveMap},
};

/// Shortest pattern length tracked by the pattern table.
pub const MIN_PATTERN_LEN: usize = 2;

/// Longest pattern length tracked by the pattern table.
pub const MAX_PATTERN_LEN: usize = 4;

/// Default number of moves retained in the history window.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Percentage reported for every move before anything has been observed.
pub const BASELINE_TENDENCY: f64 = 33.33;

/// Ordered sequence of 2 to 4 consecutive moves used as a pattern key.
///
/// Unused slots are always [`Move::Rock`] so that derived equality and
/// hashing only depend on the first `len` moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPatternKey", into = "RawPatternKey")]
pub struct PatternKey {
    moves: [Move; MAX_PATTERN_LEN],
    len: u8,
}

/// Wire form of [`PatternKey`], checked on the way back in.
#[derive(Serialize, Deserialize)]
struct RawPatternKey {
    moves: [Move; MAX_PATTERN_LEN],
    len: u8,
}

impl TryFrom<RawPatternKey> for PatternKey {
    type Error = Error;

    fn try_from(raw: RawPatternKey) -> Result<Self> {
        let len = usize::from(raw.len);
        if len > MAX_PATTERN_LEN {
            return Err(Error::CorruptState {
                message: format!("pattern length {len} exceeds {MAX_PATTERN_LEN}"),
            });
        }
        Self::new(&raw.moves[..len]).ok_or_else(|| Error::CorruptState {
            message: format!("pattern length {len} is below {MIN_PATTERN_LEN}"),
        })
    }
}

impl From<PatternKey> for RawPatternKey {
    fn from(key: PatternKey) -> Self {
        Self {
            moves: key.moves,
            len: key.len,
        }
    }
}

impl PatternKey {
    /// Build a key from a slice of 2 to 4 moves.
    pub fn new(window: &[Move]) -> Option<Self> {
        if !(MIN_PATTERN_LEN..=MAX_PATTERN_LEN).contains(&window.len()) {
            return None;
        }
        let mut moves = [Move::Rock; MAX_PATTERN_LEN];
        moves[..window.len()].copy_from_slice(window);
        Some(Self {
            moves,
            len: window.len() as u8,
        })
    }

    /// Key made of the last `len` moves of `history`, if there are that many.
    fn from_tail(history: &VecDeque<Move>, len: usize) -> Option<Self> {
        if history.len() < len {
            return None;
        }
        let window: Vec<Move> = history.iter().skip(history.len() - len).copied().collect();
        Self::new(&window)
    }

    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len as usize]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// One pattern together with what followed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternEntry {
    pub key: PatternKey,
    pub followers: MoveCounts,
}

/// Pattern table preserving first-insertion order.
///
/// Only the ordered entries are serialized; the lookup index is rebuilt on
/// deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<PatternEntry>", into = "Vec<PatternEntry>")]
pub struct PatternTable {
    entries: Vec<PatternEntry>,
    index: HashMap<PatternKey, usize>,
}

impl PatternTable {
    pub fn record(&mut self, key: PatternKey, next: Move) {
        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                self.entries.push(PatternEntry {
                    key,
                    followers: MoveCounts::default(),
                });
                self.index.insert(key, self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        self.entries[slot].followers.increment(next);
    }

    pub fn get(&self, key: &PatternKey) -> Option<&MoveCounts> {
        self.index.get(key).map(|&slot| &self.entries[slot].followers)
    }

    /// Entries in first-insertion order.
    pub fn entries(&self) -> &[PatternEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }
}

impl PartialEq for PatternTable {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl From<Vec<PatternEntry>> for PatternTable {
    fn from(entries: Vec<PatternEntry>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(slot, entry)| (entry.key, slot))
            .collect();
        Self { entries, index }
    }
}

impl From<PatternTable> for Vec<PatternEntry> {
    fn from(table: PatternTable) -> Self {
        table.entries
    }
}

/// Summary row returned by [`HistoryStore::patterns_summary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSummary {
    pub pattern: Vec<Move>,
    pub observations: MoveCounts,
    pub total: u32,
}

/// Bounded move history plus the frequency, transition, pattern and
/// counter-attempt tables derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryStore {
    capacity: usize,
    moves: VecDeque<Move>,
    frequencies: MoveCounts,
    transitions: MoveMap<MoveCounts>,
    patterns: PatternTable,
    counter_attempts: u64,
    total_moves: u64,
}

impl HistoryStore {
    /// Create an empty store retaining at most `capacity` moves.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            moves: VecDeque::with_capacity(capacity),
            frequencies: MoveCounts::default(),
            transitions: MoveMap::default(),
            patterns: PatternTable::default(),
            counter_attempts: 0,
            total_moves: 0,
        }
    }

    /// Record an observed player move.
    ///
    /// `last_prediction` is the engine's most recent predicted player move;
    /// the observation counts as a counter-attempt when it defeats it.
    pub fn observe(&mut self, mv: Move, last_prediction: Option<Move>) {
        self.frequencies.increment(mv);
        self.total_moves += 1;

        if let Some(&previous) = self.moves.back() {
            self.transitions[previous].increment(mv);
        }

        for len in MIN_PATTERN_LEN..=MAX_PATTERN_LEN {
            if let Some(key) = PatternKey::from_tail(&self.moves, len) {
                self.patterns.record(key, mv);
            }
        }

        if last_prediction.is_some_and(|predicted| mv == predicted.counter()) {
            self.counter_attempts += 1;
            log::debug!(
                "counter-attempt detected ({} of {})",
                self.counter_attempts,
                self.total_moves
            );
        }

        self.moves.push_back(mv);
        while self.moves.len() > self.capacity {
            self.moves.pop_front();
        }

        log::trace!(
            "observed {mv}: total={} patterns={}",
            self.total_moves,
            self.patterns.len()
        );
    }

    /// Check that a decoded store is consistent with itself and with the
    /// configured window size.
    pub fn validate(&self, capacity: usize) -> Result<()> {
        let corrupt = |message: String| Err(Error::CorruptState { message });
        if self.capacity != capacity {
            return corrupt(format!(
                "history capacity {} does not match configured {capacity}",
                self.capacity
            ));
        }
        if self.moves.len() > self.capacity {
            return corrupt(format!(
                "history holds {} moves but capacity is {}",
                self.moves.len(),
                self.capacity
            ));
        }
        let counted: u64 = self.frequencies.values().iter().map(|&c| u64::from(c)).sum();
        if counted != self.total_moves {
            return corrupt(format!(
                "frequencies sum to {counted} but {} moves were observed",
                self.total_moves
            ));
        }
        if (self.moves.len() as u64) > self.total_moves {
            return corrupt(format!(
                "history holds {} moves but only {} were observed",
                self.moves.len(),
                self.total_moves
            ));
        }
        if self.counter_attempts > self.total_moves {
            return corrupt(format!(
                "{} counter-attempts exceed {} observed moves",
                self.counter_attempts, self.total_moves
            ));
        }
        Ok(())
    }

    /// Drop every observation and zero all counters.
    pub fn reset(&mut self) {
        *self = Self::new(self.capacity);
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn total_moves(&self) -> u64 {
        self.total_moves
    }

    pub fn counter_attempts(&self) -> u64 {
        self.counter_attempts
    }

    pub fn frequencies(&self) -> &MoveCounts {
        &self.frequencies
    }

    /// Transition counts out of `previous`.
    pub fn transitions_from(&self, previous: Move) -> &MoveCounts {
        &self.transitions[previous]
    }

    pub fn patterns(&self) -> &PatternTable {
        &self.patterns
    }

    /// The retained history window, oldest first.
    pub fn moves(&self) -> &VecDeque<Move> {
        &self.moves
    }

    pub fn last_move(&self) -> Option<Move> {
        self.moves.back().copied()
    }

    /// Pattern key built from the most recent `len` moves.
    pub fn tail_key(&self, len: usize) -> Option<PatternKey> {
        PatternKey::from_tail(&self.moves, len)
    }

    /// Share of each move in all observations, as percentages.
    ///
    /// Before any observation every move reports [`BASELINE_TENDENCY`].
    pub fn tendencies(&self) -> MoveMap<f64> {
        if self.total_moves == 0 {
            return MoveMap::splat(BASELINE_TENDENCY);
        }
        let total = self.total_moves as f64;
        MoveMap::from_fn(|mv| f64::from(self.frequencies[mv]) / total * 100.0)
    }

    /// Row-normalized transition percentages; empty rows are all zero.
    pub fn transition_matrix(&self) -> MoveMap<MoveMap<f64>> {
        MoveMap::from_fn(|previous| self.transitions[previous].percentages())
    }

    /// The `limit` most observed patterns, most observed first.
    ///
    /// Ties keep first-insertion order.
    pub fn patterns_summary(&self, limit: usize) -> Vec<PatternSummary> {
        let mut rows: Vec<PatternSummary> = self
            .patterns
            .entries()
            .iter()
            .map(|entry| PatternSummary {
                pattern: entry.key.as_slice().to_vec(),
                observations: entry.followers,
                total: entry.followers.total(),
            })
            .collect();
        // stable sort keeps insertion order among equal totals
        rows.sort_by(|a, b| b.total.cmp(&a.total));
        rows.truncate(limit);
        rows
    }

    /// The last `n` moves in chronological order.
    pub fn recent_history(&self, n: usize) -> Vec<Move> {
        let skip = self.moves.len().saturating_sub(n);
        self.moves.iter().skip(skip).copied().collect()
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Move::{Paper, Rock, Scissors};

    fn store_with(moves: &[Move]) -> HistoryStore {
        let mut store = HistoryStore::default();
        for &mv in moves {
            store.observe(mv, None);
        }
        store
    }

    #[test]
    fn test_frequency_sum_matches_total() {
        let mut store = HistoryStore::default();
        for (i, mv) in [Rock, Paper, Paper, Scissors, Rock, Rock].into_iter().enumerate() {
            store.observe(mv, None);
            assert_eq!(u64::from(store.frequencies().total()), store.total_moves());
            assert_eq!(store.total_moves(), i as u64 + 1);
        }
    }

    #[test]
    fn test_transitions_start_from_second_move() {
        let store = store_with(&[Rock]);
        for mv in Move::ALL {
            assert_eq!(store.transitions_from(mv).total(), 0);
        }

        let store = store_with(&[Rock, Paper, Rock, Scissors]);
        assert_eq!(store.transitions_from(Rock)[Paper], 1);
        assert_eq!(store.transitions_from(Rock)[Scissors], 1);
        assert_eq!(store.transitions_from(Paper)[Rock], 1);
        assert_eq!(store.transitions_from(Scissors).total(), 0);
    }

    #[test]
    fn test_pattern_updates_use_preceding_window() {
        let store = store_with(&[Rock, Paper, Scissors]);
        // only [R,P] -> S exists after three moves
        assert_eq!(store.patterns().len(), 1);
        let key = PatternKey::new(&[Rock, Paper]).unwrap();
        assert_eq!(store.patterns().get(&key).unwrap()[Scissors], 1);

        let store = store_with(&[Rock, Paper, Scissors, Rock, Paper]);
        let len4 = PatternKey::new(&[Rock, Paper, Scissors, Rock]).unwrap();
        assert_eq!(store.patterns().get(&len4).unwrap()[Paper], 1);
    }

    #[test]
    fn test_pattern_keys_distinguish_order_and_length() {
        let a = PatternKey::new(&[Rock, Paper]).unwrap();
        let b = PatternKey::new(&[Paper, Rock]).unwrap();
        let c = PatternKey::new(&[Rock, Paper, Rock]).unwrap();
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, PatternKey::new(&[Rock, Paper]).unwrap());
        assert!(PatternKey::new(&[Rock]).is_none());
        assert!(PatternKey::new(&[Rock; 5]).is_none());
    }

    #[test]
    fn test_pattern_key_rejects_out_of_range_length() {
        let key = PatternKey::new(&[Rock, Paper, Scissors]).unwrap();
        let mut value = serde_json::to_value(key).unwrap();
        assert_eq!(serde_json::from_value::<PatternKey>(value.clone()).unwrap(), key);

        for len in [0, 1, 5, 9, 255] {
            value["len"] = serde_json::json!(len);
            assert!(
                serde_json::from_value::<PatternKey>(value.clone()).is_err(),
                "length {len} accepted"
            );
        }
    }

    #[test]
    fn test_validate_accepts_observed_history() {
        let store = store_with(&[Rock, Paper, Scissors, Rock, Paper, Rock]);
        store.validate(DEFAULT_HISTORY_CAPACITY).unwrap();
        assert!(store.validate(10).is_err());
    }

    #[test]
    fn test_validate_rejects_inconsistent_counters() {
        let store = store_with(&[Rock, Paper, Scissors, Rock]);
        let value = serde_json::to_value(&store).unwrap();

        let mut total = value.clone();
        total["total_moves"] = serde_json::json!(40);
        let decoded: HistoryStore = serde_json::from_value(total).unwrap();
        assert!(matches!(
            decoded.validate(DEFAULT_HISTORY_CAPACITY),
            Err(Error::CorruptState { .. })
        ));

        let mut capacity = value.clone();
        capacity["capacity"] = serde_json::json!(2);
        let decoded: HistoryStore = serde_json::from_value(capacity).unwrap();
        assert!(decoded.validate(2).is_err());

        let mut attempts = value;
        attempts["counter_attempts"] = serde_json::json!(5);
        let decoded: HistoryStore = serde_json::from_value(attempts).unwrap();
        assert!(decoded.validate(DEFAULT_HISTORY_CAPACITY).is_err());
    }

    #[test]
    fn test_counter_attempts() {
        let mut store = HistoryStore::default();
        store.observe(Paper, Some(Rock));
        assert_eq!(store.counter_attempts(), 1);

        store.observe(Rock, Some(Rock));
        store.observe(Scissors, Some(Rock));
        store.observe(Paper, None);
        assert_eq!(store.counter_attempts(), 1);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut store = HistoryStore::new(100);
        for i in 0..150 {
            store.observe(Move::ALL[i % 3], None);
        }
        assert_eq!(store.moves().len(), 100);
        assert_eq!(store.total_moves(), 150);
        // oldest 50 evicted: first retained move is index 50
        assert_eq!(store.moves().front().copied(), Some(Move::ALL[50 % 3]));
    }

    #[test]
    fn test_tendencies_baseline_and_values() {
        let store = HistoryStore::default();
        let tendencies = store.tendencies();
        for mv in Move::ALL {
            assert_eq!(tendencies[mv], 33.33);
        }

        let store = store_with(&[Rock, Rock, Paper, Scissors]);
        let tendencies = store.tendencies();
        assert!((tendencies[Rock] - 50.0).abs() < 1e-9);
        assert!((tendencies[Paper] - 25.0).abs() < 1e-9);
        assert!((tendencies[Scissors] - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_transition_rows_sum_to_hundred_or_zero() {
        let store = store_with(&[Rock, Paper, Rock, Rock, Scissors, Paper, Paper]);
        let matrix = store.transition_matrix();
        for previous in Move::ALL {
            let row_sum: f64 = matrix[previous].values().iter().sum();
            if store.transitions_from(previous).total() > 0 {
                assert!((row_sum - 100.0).abs() < 1e-9);
            } else {
                assert_eq!(row_sum, 0.0);
            }
        }
    }

    #[test]
    fn test_patterns_summary_orders_by_total_then_insertion() {
        let store = store_with(&[Rock, Paper, Rock, Paper, Rock]);
        let summary = store.patterns_summary(5);

        // [R,P] seen twice, everything else once
        assert_eq!(summary[0].pattern, vec![Rock, Paper]);
        assert_eq!(summary[0].total, 2);
        assert_eq!(summary[0].observations[Rock], 2);

        // remaining ties follow insertion order: [P,R] came before [R,P,R]
        assert_eq!(summary[1].pattern, vec![Paper, Rock]);
        assert_eq!(summary[2].pattern, vec![Rock, Paper, Rock]);

        assert!(store.patterns_summary(2).len() <= 2);
    }

    #[test]
    fn test_recent_history() {
        let store = store_with(&[Rock, Paper, Scissors, Rock]);
        assert_eq!(store.recent_history(2), vec![Scissors, Rock]);
        assert_eq!(store.recent_history(10), vec![Rock, Paper, Scissors, Rock]);
        assert!(store.recent_history(0).is_empty());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut store = store_with(&[Rock, Paper, Scissors, Rock, Paper]);
        store.observe(Paper, Some(Rock));
        store.reset();
        assert_eq!(store, HistoryStore::default());
        store.reset();
        assert_eq!(store, HistoryStore::default());
    }
}
