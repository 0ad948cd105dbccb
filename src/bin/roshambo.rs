//! roshambo CLI - Play against and study the adaptive rock-paper-scissors engine
//!
//! This CLI provides:
//! - Interactive play on stdin
//! - Simulated matches against scripted players
//! - Inspection of saved engines

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "roshambo")]
#[command(version, about = "Adaptive rock-paper-scissors engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively against the engine
    Play(roshambo::cli::commands::play::PlayArgs),

    /// Simulate a match against a scripted player
    Simulate(roshambo::cli::commands::simulate::SimulateArgs),

    /// Show what a saved engine has learned
    Inspect(roshambo::cli::commands::inspect::InspectArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => roshambo::cli::commands::play::execute(args),
        Commands::Simulate(args) => roshambo::cli::commands::simulate::execute(args),
        Commands::Inspect(args) => roshambo::cli::commands::inspect::execute(args),
    }
}
