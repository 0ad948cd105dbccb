//! Observer pattern for match pipelines
//!
//! Observers collect data while a match runs without coupling the pipeline
//! to specific output formats.

use std::{fs::File, path::Path};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    ports::Observer,
    session::{RoundRecord, Scoreboard},
    types::RoundOutcome,
};

/// Progress bar observer - Shows match progress
#[derive(Default)]
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self::default()
    }
}

fn score_message(scoreboard: &Scoreboard) -> String {
    format!(
        "{} P:{} D:{}",
        scoreboard.engine_wins, scoreboard.player_wins, scoreboard.draws
    )
}

impl Observer for ProgressObserver {
    fn on_match_start(&mut self, total_rounds: usize) -> Result<()> {
        let pb = ProgressBar::new(total_rounds as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} rounds (E:{msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_round(&mut self, _record: &RoundRecord, scoreboard: &Scoreboard) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.inc(1);
            pb.set_message(score_message(scoreboard));
        }
        Ok(())
    }

    fn on_match_end(&mut self, scoreboard: &Scoreboard) -> Result<()> {
        if let Some(pb) = self.progress_bar.take() {
            pb.finish_with_message(score_message(scoreboard));
        }
        Ok(())
    }
}

/// Metrics observer - Tracks prediction quality over a match
#[derive(Debug, Default)]
pub struct MetricsObserver {
    rounds: usize,
    engine_wins: usize,
    hits: usize,
    confidence_sum: f64,
    /// Hits among rounds the engine was at least 50% confident about
    confident_rounds: usize,
    confident_hits: usize,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Engine wins per round observed
    pub fn win_rate(&self) -> f64 {
        ratio(self.engine_wins, self.rounds)
    }

    /// Fraction of correct predictions
    pub fn accuracy(&self) -> f64 {
        ratio(self.hits, self.rounds)
    }

    /// Accuracy over rounds predicted with confidence of 50 or more
    pub fn confident_accuracy(&self) -> f64 {
        ratio(self.confident_hits, self.confident_rounds)
    }

    pub fn mean_confidence(&self) -> f64 {
        if self.rounds == 0 {
            0.0
        } else {
            self.confidence_sum / self.rounds as f64
        }
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            rounds: self.rounds,
            engine_wins: self.engine_wins,
            win_rate: self.win_rate(),
            accuracy: self.accuracy(),
            confident_accuracy: self.confident_accuracy(),
            mean_confidence: self.mean_confidence(),
        }
    }
}

fn ratio(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// Summary of match metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub rounds: usize,
    pub engine_wins: usize,
    pub win_rate: f64,
    pub accuracy: f64,
    pub confident_accuracy: f64,
    pub mean_confidence: f64,
}

impl Observer for MetricsObserver {
    fn on_round(&mut self, record: &RoundRecord, _scoreboard: &Scoreboard) -> Result<()> {
        self.rounds += 1;
        self.confidence_sum += record.confidence;
        if record.outcome == RoundOutcome::EngineWin {
            self.engine_wins += 1;
        }
        if record.prediction_hit() {
            self.hits += 1;
        }
        if record.confidence >= 50.0 {
            self.confident_rounds += 1;
            if record.prediction_hit() {
                self.confident_hits += 1;
            }
        }
        Ok(())
    }

    fn on_match_end(&mut self, _scoreboard: &Scoreboard) -> Result<()> {
        log::info!(
            "metrics: {} rounds, accuracy {:.3}, mean confidence {:.1}",
            self.rounds,
            self.accuracy(),
            self.mean_confidence()
        );
        Ok(())
    }
}

/// One CSV row per round
#[derive(Debug, Serialize)]
struct RoundRow<'a> {
    round: usize,
    player_move: &'a str,
    engine_move: &'a str,
    predicted: &'a str,
    confidence: f64,
    outcome: &'a str,
}

impl<'a> From<&'a RoundRecord> for RoundRow<'a> {
    fn from(record: &'a RoundRecord) -> Self {
        Self {
            round: record.round,
            player_move: record.player_move.name(),
            engine_move: record.engine_move.name(),
            predicted: record.predicted.name(),
            confidence: record.confidence,
            outcome: record.outcome.label(),
        }
    }
}

/// CSV observer - Exports every round to a CSV file
pub struct CsvObserver {
    writer: csv::Writer<File>,
}

impl CsvObserver {
    /// Create a CSV observer writing to `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let writer = csv::Writer::from_path(path)?;
        Ok(Self { writer })
    }
}

impl Observer for CsvObserver {
    fn on_round(&mut self, record: &RoundRecord, _scoreboard: &Scoreboard) -> Result<()> {
        self.writer.serialize(RoundRow::from(record))?;
        Ok(())
    }

    fn on_match_end(&mut self, _scoreboard: &Scoreboard) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
