//! Tunable parameters of the prediction engine.

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    history::{DEFAULT_HISTORY_CAPACITY, MAX_PATTERN_LEN},
};

/// Combiner weight of each sub-predictor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnsembleWeights {
    pub frequency: f64,
    pub markov: f64,
    pub pattern: f64,
    pub meta: f64,
}

impl EnsembleWeights {
    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("frequency", self.frequency),
            ("markov", self.markov),
            ("pattern", self.pattern),
            ("meta", self.meta),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::InvalidWeight {
                    name: name.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }
}

impl Default for EnsembleWeights {
    fn default() -> Self {
        Self {
            frequency: 0.2,
            markov: 0.4,
            pattern: 0.3,
            meta: 0.1,
        }
    }
}

/// Configuration for a [`PredictionEngine`](super::PredictionEngine).
///
/// The meta-strategy threshold and confidence are heuristics; they are kept
/// here rather than hard-coded so they can be tuned per session.
///
/// # Examples
///
/// ```
/// use roshambo::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_seed(42)
///     .with_meta_counter_threshold(0.5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of recent moves kept in the history window
    pub history_capacity: usize,
    /// Observations required before the ensemble leaves cold start
    pub cold_start_threshold: u64,
    /// Confidence reported while in cold start
    pub cold_start_confidence: f64,
    /// Combiner weights
    pub weights: EnsembleWeights,
    /// Observations required before the meta-strategy predictor may vote
    pub meta_min_moves: u64,
    /// Counter-attempt rate above which the meta-strategy predictor votes
    pub meta_counter_threshold: f64,
    /// Confidence of the meta-strategy vote
    pub meta_confidence: f64,
    /// Random seed for reproducibility (None = fresh seed)
    pub seed: Option<u64>,
}

impl EngineConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    pub fn with_weights(mut self, weights: EnsembleWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_meta_counter_threshold(mut self, threshold: f64) -> Self {
        self.meta_counter_threshold = threshold;
        self
    }

    pub fn with_meta_confidence(mut self, confidence: f64) -> Self {
        self.meta_confidence = confidence;
        self
    }

    /// Check that every parameter is within its domain.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWeight`] for a negative or non-finite weight
    /// and [`Error::InvalidConfiguration`] for any other out-of-range value.
    pub fn validate(&self) -> Result<()> {
        if self.history_capacity < MAX_PATTERN_LEN {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "history_capacity must be at least {MAX_PATTERN_LEN}, got {}",
                    self.history_capacity
                ),
            });
        }
        if self.cold_start_threshold == 0 {
            return Err(Error::InvalidConfiguration {
                message: "cold_start_threshold must be at least 1".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.meta_counter_threshold) {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "meta_counter_threshold must be within [0, 1], got {}",
                    self.meta_counter_threshold
                ),
            });
        }
        for (name, value) in [
            ("cold_start_confidence", self.cold_start_confidence),
            ("meta_confidence", self.meta_confidence),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(Error::InvalidConfiguration {
                    message: format!("{name} must be within [0, 100], got {value}"),
                });
            }
        }
        self.weights.validate()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            cold_start_threshold: 5,
            cold_start_confidence: 33.0,
            weights: EnsembleWeights::default(),
            meta_min_moves: 10,
            meta_counter_threshold: 0.6,
            meta_confidence: 50.0,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_small_history() {
        let config = EngineConfig::default().with_history_capacity(3);
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_rejects_negative_weight() {
        let config = EngineConfig::default().with_weights(EnsembleWeights {
            markov: -0.1,
            ..EnsembleWeights::default()
        });
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidWeight { ref name, .. }) if name == "markov"
        ));
    }

    #[test]
    fn test_rejects_out_of_range_meta_parameters() {
        let config = EngineConfig::default().with_meta_counter_threshold(1.5);
        assert!(config.validate().is_err());

        let config = EngineConfig::default().with_meta_confidence(120.0);
        assert!(config.validate().is_err());
    }
}
