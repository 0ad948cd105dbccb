//! Output formatting for CLI
//!
//! Every printer writes to a caller-supplied writer so commands can target
//! stdout while tests capture the text.

use std::io::{self, Write};

use crate::{
    engine::PredictionEngine,
    history::PatternSummary,
    session::Scoreboard,
    types::{Move, MoveMap, format_moves},
};

/// Print a section header
pub fn print_section(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out, "\n{}", "=".repeat(60))?;
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "=".repeat(60))
}

/// Print a subsection header
pub fn print_subsection(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out, "\n{title}")?;
    writeln!(out, "{}", "-".repeat(40))
}

/// Print a key-value pair
pub fn print_kv(out: &mut impl Write, key: &str, value: &str) -> io::Result<()> {
    writeln!(out, "  {:20} {}", format!("{}:", key), value)
}

/// Format a 0..=1 ratio as a percentage
pub fn format_rate(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

pub fn print_tendencies(out: &mut impl Write, tendencies: &MoveMap<f64>) -> io::Result<()> {
    for (mv, pct) in tendencies.iter() {
        print_kv(out, mv.name(), &format!("{pct:5.1}%"))?;
    }
    Ok(())
}

/// Print the transition matrix, one row per previous move
pub fn print_transition_matrix(
    out: &mut impl Write,
    matrix: &MoveMap<MoveMap<f64>>,
) -> io::Result<()> {
    write!(out, "  {:10}", "from\\to")?;
    for mv in Move::ALL {
        write!(out, "{:>10}", mv.name())?;
    }
    writeln!(out)?;
    for (from, row) in matrix.iter() {
        write!(out, "  {:10}", from.name())?;
        for (_, pct) in row.iter() {
            write!(out, "{pct:>9.1}%")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Format a pattern summary as `RPR -> R:2 P:0 S:1 (3)`
pub fn format_pattern(summary: &PatternSummary) -> String {
    let counts: Vec<String> = summary
        .observations
        .iter()
        .map(|(mv, count)| format!("{}:{count}", mv.symbol()))
        .collect();
    format!(
        "{:6} -> {} ({})",
        format_moves(&summary.pattern),
        counts.join(" "),
        summary.total
    )
}

pub fn print_patterns(out: &mut impl Write, patterns: &[PatternSummary]) -> io::Result<()> {
    if patterns.is_empty() {
        writeln!(out, "  (no patterns yet)")?;
    }
    for summary in patterns {
        writeln!(out, "  {}", format_pattern(summary))?;
    }
    Ok(())
}

pub fn print_scoreboard(out: &mut impl Write, scoreboard: &Scoreboard) -> io::Result<()> {
    let with_rate = |count: usize, rate: f64| format!("{count} ({})", format_rate(rate));
    print_kv(out, "Rounds", &scoreboard.rounds.to_string())?;
    print_kv(
        out,
        "Engine wins",
        &with_rate(scoreboard.engine_wins, scoreboard.engine_win_rate()),
    )?;
    print_kv(
        out,
        "Player wins",
        &with_rate(scoreboard.player_wins, scoreboard.player_win_rate()),
    )?;
    print_kv(out, "Draws", &with_rate(scoreboard.draws, scoreboard.draw_rate()))?;
    print_kv(
        out,
        "Longest streak",
        &scoreboard.longest_engine_streak.to_string(),
    )
}

/// Print what the engine has learned so far
pub fn print_engine_stats(
    out: &mut impl Write,
    engine: &PredictionEngine,
    patterns: usize,
    recent: usize,
) -> io::Result<()> {
    print_kv(out, "Moves observed", &engine.total_moves().to_string())?;
    print_kv(out, "Counter-attempts", &engine.counter_attempts().to_string())?;
    print_kv(out, "Confidence", &format!("{}%", engine.confidence()))?;
    print_kv(out, "Recent moves", &format_moves(&engine.recent_history(recent)))?;

    print_subsection(out, "Tendencies")?;
    print_tendencies(out, &engine.tendencies())?;

    print_subsection(out, "Transitions")?;
    print_transition_matrix(out, &engine.transition_matrix())?;

    print_subsection(out, "Top patterns")?;
    print_patterns(out, &engine.patterns_summary(patterns))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MoveCounts;

    #[test]
    fn test_format_pattern() {
        let mut observations = MoveCounts::default();
        observations.increment(Move::Rock);
        observations.increment(Move::Rock);
        observations.increment(Move::Scissors);
        let summary = PatternSummary {
            pattern: vec![Move::Rock, Move::Paper],
            observations,
            total: 3,
        };
        assert_eq!(format_pattern(&summary), "RP     -> R:2 P:0 S:1 (3)");
    }

    #[test]
    fn test_print_engine_stats_writes_every_table() {
        let mut engine =
            PredictionEngine::new(crate::EngineConfig::default().with_seed(2)).unwrap();
        for mv in [Move::Rock, Move::Paper, Move::Rock, Move::Paper] {
            engine.get_move();
            engine.observe(mv);
        }
        let mut out = Vec::new();
        print_engine_stats(&mut out, &engine, 5, 3).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(
            text.lines()
                .any(|line| line.trim_start().starts_with("Moves observed:") && line.ends_with(" 4"))
        );
        assert!(text.contains("Recent moves:"));
        assert!(text.contains("from\\to"));
        assert!(text.contains("RP     -> R:1 P:0 S:0 (1)"));
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(0.25), "25.0%");
    }
}
