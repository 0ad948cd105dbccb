//! Behavioral properties of the prediction engine.

mod common;

use common::{play, random_moves, seeded_engine};
use roshambo::{
    Move::{self, Paper, Rock, Scissors},
    MoveMap, counter_move,
    ensemble::{Regime, predictors},
    history::{HistoryStore, PatternKey},
};

#[test]
fn test_frequency_counts_sum_to_total_moves() {
    for seed in 0..10 {
        let mut engine = seeded_engine(seed);
        for mv in random_moves(seed + 100, 150) {
            engine.get_move();
            engine.observe(mv);
            let counted: u64 = engine
                .history()
                .frequencies()
                .values()
                .iter()
                .map(|&c| u64::from(c))
                .sum();
            assert_eq!(counted, engine.total_moves());
        }
    }
}

#[test]
fn test_transition_rows_sum_to_hundred_or_zero() {
    let mut engine = seeded_engine(1);
    // scissors never observed before the last move, so its row stays empty
    play(&mut engine, &[Rock, Paper, Rock, Rock, Paper, Paper, Scissors]);

    let matrix = engine.transition_matrix();
    for (from, row) in matrix.iter() {
        let sum: f64 = row.values().iter().sum();
        if engine.history().transitions_from(from).total() > 0 {
            assert!((sum - 100.0).abs() < 1e-9, "row {from} sums to {sum}");
        } else {
            assert_eq!(*row, MoveMap::splat(0.0));
        }
    }
    assert_eq!(matrix[Scissors], MoveMap::splat(0.0));
}

#[test]
fn test_transition_rows_hold_for_random_play() {
    let mut engine = seeded_engine(2);
    play(&mut engine, &random_moves(3, 400));
    for (from, row) in engine.transition_matrix().iter() {
        let sum: f64 = row.values().iter().sum();
        assert!((sum - 100.0).abs() < 1e-9, "row {from} sums to {sum}");
    }
}

#[test]
fn test_reset_is_idempotent_and_matches_fresh_engine() {
    let mut engine = seeded_engine(4);
    play(&mut engine, &random_moves(5, 60));

    engine.reset();
    let once = engine.clone();
    engine.reset();

    assert_eq!(engine, once);
    assert_eq!(engine, seeded_engine(4));
}

#[test]
fn test_cold_start_confidence_is_fixed() {
    for seed in 0..50 {
        let mut engine = seeded_engine(seed);
        for mv in [Rock, Paper, Scissors, Rock] {
            let prediction = engine.predict();
            assert_eq!(prediction.regime, Regime::ColdStart);
            assert_eq!(prediction.confidence, 33.0);
            assert_eq!(engine.confidence(), 33);
            engine.observe(mv);
        }
        assert_eq!(engine.predict().regime, Regime::Warm);
    }
}

#[test]
fn test_cold_start_guesses_cover_all_moves_evenly() {
    let trials = 3000;
    let mut seen = MoveMap::splat(0usize);
    for seed in 0..trials {
        let mut engine = seeded_engine(seed);
        seen[engine.predict().predicted] += 1;
    }
    for (mv, &count) in seen.iter() {
        assert!(
            (800..=1200).contains(&count),
            "{mv} guessed {count} times out of {trials}"
        );
    }
}

#[test]
fn test_longest_pattern_wins_over_shorter() {
    let mut history = HistoryStore::default();
    let moves = [
        Rock, Paper, Rock, Paper, Rock, Scissors, // RPRP -> R
        Rock, Paper, Scissors, Rock, Paper, Scissors, Rock, Paper, Scissors, Rock, Paper,
        Scissors, // RP -> S, four times
        Rock, Paper, Rock, Paper,
    ];
    for mv in moves {
        history.observe(mv, None);
    }

    let short = PatternKey::new(&[Rock, Paper]).unwrap();
    let long = PatternKey::new(&[Rock, Paper, Rock, Paper]).unwrap();
    let short_counts = history.patterns().get(&short).unwrap();
    assert_eq!(short_counts.argmax(), Some((Scissors, 4)));
    assert_eq!(history.patterns().get(&long).unwrap()[Rock], 1);

    let vote = predictors::pattern(&history).unwrap();
    assert_eq!(vote.predicted, Rock);
    assert_eq!(vote.confidence, 100.0);
}

#[test]
fn test_counter_attempts_count_only_winning_replies() {
    let mut history = HistoryStore::default();
    history.observe(Paper, Some(Rock));
    assert_eq!(history.counter_attempts(), 1);

    history.observe(Rock, Some(Rock));
    history.observe(Scissors, Some(Rock));
    history.observe(Scissors, None);
    assert_eq!(history.counter_attempts(), 1);

    for predicted in Move::ALL {
        let before = history.counter_attempts();
        history.observe(counter_move(predicted), Some(predicted));
        assert_eq!(history.counter_attempts(), before + 1);
    }
}

#[test]
fn test_repeated_rock_is_beaten_by_paper() {
    for seed in 0..20 {
        let mut engine = seeded_engine(seed);
        play(&mut engine, &[Rock; 6]);
        for _ in 0..5 {
            assert_eq!(engine.get_move(), Paper);
            assert!(engine.confidence() >= 90);
            engine.observe(Rock);
        }
    }
}

#[test]
fn test_fresh_and_reset_engines_report_baseline_tendencies() {
    let mut engine = seeded_engine(6);
    let baseline = MoveMap::splat(33.33);
    assert_eq!(engine.tendencies(), baseline);

    play(&mut engine, &[Rock, Rock, Scissors]);
    assert_ne!(engine.tendencies(), baseline);

    engine.reset();
    assert_eq!(engine.tendencies(), baseline);
}

#[test]
fn test_history_window_is_bounded() {
    let mut engine = seeded_engine(7);
    play(&mut engine, &random_moves(8, 250));
    assert_eq!(engine.history().moves().len(), 100);
    assert_eq!(engine.total_moves(), 250);
    assert_eq!(engine.recent().len(), 10);
}

#[test]
fn test_meta_predictor_fires_against_persistent_counters() {
    let mut engine = seeded_engine(9);
    for _ in 0..40 {
        let predicted = engine.predict().predicted;
        engine.observe(counter_move(predicted));
    }
    assert_eq!(engine.counter_attempts(), 40);

    let prediction = engine.predict();
    let meta = prediction.votes.meta.expect("meta vote");
    assert_eq!(meta.confidence, 50.0);
}
