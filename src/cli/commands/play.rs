//! Play command - Interactive game against the engine on stdin

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::App,
    cli::output::{print_engine_stats, print_scoreboard, print_section},
    engine::{DEFAULT_PATTERN_LIMIT, DEFAULT_RECENT_LIMIT, EngineConfig},
    session::GameSession,
    types::{Move, RoundOutcome},
};

#[derive(Parser, Debug)]
#[command(about = "Play rock-paper-scissors against the engine")]
pub struct PlayArgs {
    /// Resume a saved engine
    #[arg(long)]
    pub load: Option<PathBuf>,

    /// Save the engine here when the game ends
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Random seed for reproducibility (ignored with --load)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of recent moves shown by `stats`
    #[arg(long, default_value_t = DEFAULT_RECENT_LIMIT)]
    pub recent: usize,
}

/// A line of player input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play(Move),
    Stats,
    Reset,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "stats" => Some(Command::Stats),
            "reset" => Some(Command::Reset),
            "quit" | "q" | "exit" => Some(Command::Quit),
            other => other.parse().ok().map(Command::Play),
        }
    }
}

pub fn execute(args: PlayArgs) -> Result<()> {
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

    let mut out = io::stdout();
    writeln!(out, "Rock, paper, scissors. Enter r, p or s (or stats, reset, quit).")?;
    run(&mut session, io::stdin().lock(), &mut out, args.recent)?;

    print_section(&mut out, "Final score")?;
    print_scoreboard(&mut out, session.scoreboard())?;

    if let Some(path) = &args.save {
        if session.engine().total_moves() == 0 {
            log::warn!("saving an engine that has observed no moves");
        }
        app.save_session(&session, path)
            .with_context(|| format!("failed to save engine to {}", path.display()))?;
        writeln!(out, "\nEngine saved to {}", path.display())?;
    }
    Ok(())
}

/// Read commands from `input` until `quit` or end of input.
///
/// Returns the number of rounds played.
pub fn run<R: BufRead, W: Write>(
    session: &mut GameSession,
    input: R,
    mut output: W,
    recent: usize,
) -> Result<usize> {
    let mut played = 0;
    write!(output, "> ")?;
    output.flush()?;

    for line in input.lines() {
        let line = line.context("failed to read input")?;
        if line.trim().is_empty() {
            write!(output, "> ")?;
            output.flush()?;
            continue;
        }

        match Command::parse(&line) {
            Some(Command::Play(mv)) => {
                let record = session.play_round(mv);
                played += 1;
                let verdict = match record.outcome {
                    RoundOutcome::PlayerWin => "you win",
                    RoundOutcome::EngineWin => "engine wins",
                    RoundOutcome::Draw => "draw",
                };
                writeln!(
                    output,
                    "You: {} | Engine: {} | {} (confidence {:.0}%)",
                    record.player_move, record.engine_move, verdict, record.confidence
                )?;
            }
            Some(Command::Stats) => {
                print_section(&mut output, "Engine state")?;
                print_scoreboard(&mut output, session.scoreboard())?;
                print_engine_stats(&mut output, session.engine(), DEFAULT_PATTERN_LIMIT, recent)?;
            }
            Some(Command::Reset) => {
                session.reset();
                writeln!(output, "Engine reset.")?;
            }
            Some(Command::Quit) => break,
            None => writeln!(
                output,
                "Unrecognized input '{}'. Enter r, p, s, stats, reset or quit.",
                line.trim()
            )?,
        }
        write!(output, "> ")?;
        output.flush()?;
    }
    writeln!(output)?;
    Ok(played)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("R"), Some(Command::Play(Move::Rock)));
        assert_eq!(Command::parse(" scissors "), Some(Command::Play(Move::Scissors)));
        assert_eq!(Command::parse("stats"), Some(Command::Stats));
        assert_eq!(Command::parse("q"), Some(Command::Quit));
        assert_eq!(Command::parse("lizard"), None);
    }

    #[test]
    fn test_run_plays_until_quit() {
        let mut session = GameSession::new(EngineConfig::default().with_seed(3)).unwrap();
        let input = b"r\np\nbogus\n\ns\nquit\nr\n";
        let mut output = Vec::new();

        let played = run(&mut session, &input[..], &mut output, 10).unwrap();

        assert_eq!(played, 3);
        assert_eq!(session.engine().total_moves(), 3);
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Unrecognized input 'bogus'"));
        assert_eq!(text.matches("You: ").count(), 3);
    }

    #[test]
    fn test_run_writes_stats_to_output() {
        let mut session = GameSession::new(EngineConfig::default().with_seed(5)).unwrap();
        let mut output = Vec::new();

        run(&mut session, &b"r\nstats\nquit\n"[..], &mut output, 10).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Engine state"));
        assert!(text.contains("Moves observed:"));
        assert!(text.contains("Top patterns"));
        assert!(text.contains("Rounds:"));
    }

    #[test]
    fn test_run_reset() {
        let mut session = GameSession::new(EngineConfig::default().with_seed(4)).unwrap();
        run(&mut session, &b"r\nr\nreset\n"[..], Vec::new(), 10).unwrap();
        assert_eq!(session.engine().total_moves(), 0);
        assert_eq!(session.scoreboard().rounds, 0);
    }
}
