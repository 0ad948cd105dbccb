//! Matches between the engine and scripted players.

use roshambo::{
    EngineConfig, GameSession, Move,
    opponents::{BeatLastPlayer, CyclePlayer, PlayerKind, RandomPlayer},
    pipeline::{MatchConfig, MatchPipeline, MatchResult, MetricsObserver, Player},
};
use tempfile::tempdir;

fn run_match(engine_seed: u64, player: &mut dyn Player, rounds: usize) -> MatchResult {
    let mut session = GameSession::new(EngineConfig::default().with_seed(engine_seed)).unwrap();
    let mut pipeline = MatchPipeline::new(MatchConfig {
        rounds,
        seed: Some(engine_seed + 1),
    })
    .with_observer(Box::new(MetricsObserver::new()));
    pipeline.run(&mut session, player).unwrap()
}

#[test]
fn test_engine_dominates_constant_player() {
    for mv in Move::ALL {
        let mut player = PlayerKind::Constant(mv).build(None).unwrap();
        let result = run_match(1, player.as_mut(), 200);
        assert!(
            result.engine_win_rate > 0.9,
            "only {:.2} against constant {mv}",
            result.engine_win_rate
        );
    }
}

#[test]
fn test_engine_learns_a_cycle() {
    let result = run_match(2, &mut CyclePlayer, 300);
    assert!(
        result.engine_win_rate > 0.8,
        "win rate {:.2}",
        result.engine_win_rate
    );
    assert!(result.prediction_accuracy > 0.8);
}

#[test]
fn test_engine_beats_reactive_player() {
    let result = run_match(3, &mut BeatLastPlayer, 300);
    assert!(result.engine_wins > result.player_wins);
}

#[test]
fn test_random_player_keeps_engine_near_a_third() {
    let mut player = RandomPlayer::new();
    let result = run_match(4, &mut player, 3000);
    assert!(
        (0.25..0.42).contains(&result.engine_win_rate),
        "win rate {:.3}",
        result.engine_win_rate
    );
}

#[test]
fn test_seeded_matches_are_reproducible() {
    let mut a = PlayerKind::Biased.build(None).unwrap();
    let mut b = PlayerKind::Biased.build(None).unwrap();
    let first = run_match(5, a.as_mut(), 150);
    let second = run_match(5, b.as_mut(), 150);
    assert_eq!(first.engine_wins, second.engine_wins);
    assert_eq!(first.draws, second.draws);
    assert_eq!(first.mean_confidence, second.mean_confidence);
}

#[test]
fn test_match_result_json_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("summary.json");

    let result = run_match(6, &mut CyclePlayer, 50);
    result.save(&path).unwrap();
    let loaded = MatchResult::load(&path).unwrap();

    assert_eq!(loaded.opponent, "cycle");
    assert_eq!(loaded.rounds, 50);
    assert_eq!(loaded.engine_wins, result.engine_wins);
}
