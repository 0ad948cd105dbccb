//! Inspect command - Show what a saved engine has learned

use std::{
    collections::BTreeMap,
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::{
    app::App,
    cli::output::{print_engine_stats, print_kv, print_scoreboard, print_section},
    engine::{DEFAULT_PATTERN_LIMIT, DEFAULT_RECENT_LIMIT},
    persistence::SavedEngine,
    session::Scoreboard,
    types::{Move, MoveMap, format_moves},
};

#[derive(Parser, Debug)]
#[command(about = "Inspect a saved engine")]
pub struct InspectArgs {
    /// Path to a saved engine
    pub file: PathBuf,

    /// Print a JSON report instead of text
    #[arg(long)]
    pub json: bool,

    /// Number of patterns to show
    #[arg(long, default_value_t = DEFAULT_PATTERN_LIMIT)]
    pub patterns: usize,

    /// Number of recent moves to show
    #[arg(long, default_value_t = DEFAULT_RECENT_LIMIT)]
    pub recent: usize,
}

#[derive(Debug, Serialize)]
pub struct PatternReport {
    pub pattern: String,
    pub observations: BTreeMap<&'static str, u32>,
    pub total: u32,
}

/// Machine-readable view of a saved engine
#[derive(Debug, Serialize)]
pub struct InspectReport {
    pub version: u32,
    pub seed: u64,
    pub opponent: Option<String>,
    pub total_moves: u64,
    pub counter_attempts: u64,
    pub confidence: u8,
    pub last_prediction: Option<Move>,
    pub tendencies: BTreeMap<&'static str, f64>,
    pub transitions: BTreeMap<&'static str, BTreeMap<&'static str, f64>>,
    pub patterns: Vec<PatternReport>,
    pub recent: String,
    pub scoreboard: Scoreboard,
}

fn by_name<T: Copy>(map: &MoveMap<T>) -> BTreeMap<&'static str, T> {
    map.iter().map(|(mv, &value)| (mv.name(), value)).collect()
}

impl InspectReport {
    pub fn new(saved: &SavedEngine, patterns: usize, recent: usize) -> Self {
        let engine = &saved.engine;
        Self {
            version: saved.version,
            seed: engine.seed(),
            opponent: saved.opponent.clone(),
            total_moves: engine.total_moves(),
            counter_attempts: engine.counter_attempts(),
            confidence: engine.confidence(),
            last_prediction: engine.last_prediction(),
            tendencies: by_name(&engine.tendencies()),
            transitions: engine
                .transition_matrix()
                .iter()
                .map(|(mv, row)| (mv.name(), by_name(row)))
                .collect(),
            patterns: engine
                .patterns_summary(patterns)
                .into_iter()
                .map(|summary| PatternReport {
                    pattern: format_moves(&summary.pattern),
                    observations: by_name(&summary.observations),
                    total: summary.total,
                })
                .collect(),
            recent: format_moves(&engine.recent_history(recent)),
            scoreboard: saved.scoreboard,
        }
    }
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let app = App::new();
    let saved = app
        .load(&args.file)
        .with_context(|| format!("failed to load engine from {}", args.file.display()))?;

    let mut out = io::stdout();
    if args.json {
        let report = InspectReport::new(&saved, args.patterns, args.recent);
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    print_section(&mut out, &format!("Engine {}", args.file.display()))?;
    print_kv(&mut out, "Format version", &saved.version.to_string())?;
    print_kv(&mut out, "Seed", &saved.engine.seed().to_string())?;
    if let Some(opponent) = &saved.opponent {
        print_kv(&mut out, "Last opponent", opponent)?;
    }
    print_scoreboard(&mut out, &saved.scoreboard)?;
    print_engine_stats(&mut out, &saved.engine, args.patterns, args.recent)?;
    Ok(())
}
