//! Simulate command - Run the engine against a scripted player

use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::App,
    cli::output::{
        format_rate, print_engine_stats, print_kv, print_scoreboard, print_section,
        print_subsection,
    },
    engine::{DEFAULT_PATTERN_LIMIT, DEFAULT_RECENT_LIMIT, EngineConfig},
    opponents::PlayerKind,
    persistence::SavedEngine,
    pipeline::{CsvObserver, MatchConfig, MatchPipeline, MetricsObserver, ProgressObserver},
};

#[derive(Parser, Debug)]
#[command(about = "Simulate a match against a scripted player")]
pub struct SimulateArgs {
    /// Opponent: rock, paper, scissors, cycle, random, biased, beat-last, mirror
    #[arg(long, short = 'o')]
    pub opponent: PlayerKind,

    /// Number of rounds
    #[arg(long, short = 'r', default_value_t = 200)]
    pub rounds: usize,

    /// Random seed for the engine (the opponent uses seed + 1)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Resume a saved engine instead of starting fresh
    #[arg(long)]
    pub load: Option<PathBuf>,

    /// Write every round to a CSV file
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Save the engine after the match
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Write the match result as JSON
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

pub fn execute(args: SimulateArgs) -> Result<()> {
    let app = App::new();
    let mut session = match &args.load {
        Some(path) => app
            .load_session(path)
            .with_context(|| format!("failed to load engine from {}", path.display()))?,
        None => {
            let mut config = EngineConfig::default();
            config.seed = args.seed;
            app.create_session(config)?
        }
    };

    if args.rounds == 0 {
        log::warn!("simulating zero rounds");
    }

    let player_seed = args.seed.map(|s| s.wrapping_add(1));
    let mut player = args.opponent.build(player_seed)?;

    let mut out = io::stdout();
    print_section(&mut out, "Match configuration")?;
    print_kv(&mut out, "Opponent", player.name())?;
    print_kv(&mut out, "Rounds", &args.rounds.to_string())?;
    print_kv(&mut out, "Engine seed", &session.engine().seed().to_string())?;

    let mut pipeline = MatchPipeline::new(MatchConfig {
        rounds: args.rounds,
        seed: player_seed,
    })
    .with_observer(Box::new(MetricsObserver::new()));
    if !args.no_progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.export {
        let observer = CsvObserver::new(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        pipeline = pipeline.with_observer(Box::new(observer));
    }

    let result = pipeline.run(&mut session, player.as_mut())?;

    print_section(&mut out, "Match result")?;
    print_kv(&mut out, "Engine wins", &result.engine_wins.to_string())?;
    print_kv(&mut out, "Player wins", &result.player_wins.to_string())?;
    print_kv(&mut out, "Draws", &result.draws.to_string())?;
    print_kv(&mut out, "Engine win rate", &format_rate(result.engine_win_rate))?;
    print_kv(&mut out, "Prediction accuracy", &format_rate(result.prediction_accuracy))?;
    print_kv(&mut out, "Mean confidence", &format!("{:.1}%", result.mean_confidence))?;

    print_subsection(&mut out, "Lifetime score")?;
    print_scoreboard(&mut out, session.scoreboard())?;

    print_section(&mut out, "Engine state")?;
    print_engine_stats(&mut out, session.engine(), DEFAULT_PATTERN_LIMIT, DEFAULT_RECENT_LIMIT)?;

    if let Some(path) = &args.export {
        writeln!(out, "\nRounds exported to {}", path.display())?;
    }
    if let Some(path) = &args.summary {
        result
            .save(path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        writeln!(out, "Summary written to {}", path.display())?;
    }
    if let Some(path) = &args.save {
        let saved = SavedEngine::from_session(&session).with_opponent(player.name());
        app.save(&saved, path)
            .with_context(|| format!("failed to save engine to {}", path.display()))?;
        writeln!(out, "Engine saved to {}", path.display())?;
    }
    Ok(())
}
