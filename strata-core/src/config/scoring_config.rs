use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants::{MAX_IMPORTANCE, WEIGHT_SUM_TOLERANCE};
use crate::errors::ConfigError;

/// Top-level weights of the four sub-scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub access: f64,
    pub importance: f64,
    pub age: f64,
    pub connection: f64,
}

impl ScoreWeights {
    pub fn sum(&self) -> f64 {
        self.access + self.importance + self.age + self.connection
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            access: defaults::DEFAULT_ACCESS_WEIGHT,
            importance: defaults::DEFAULT_IMPORTANCE_WEIGHT,
            age: defaults::DEFAULT_AGE_WEIGHT,
            connection: defaults::DEFAULT_CONNECTION_WEIGHT,
        }
    }
}

/// Blend of recency and frequency inside the access sub-score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessMix {
    pub recency: f64,
    pub frequency: f64,
}

impl Default for AccessMix {
    fn default() -> Self {
        Self {
            recency: defaults::DEFAULT_RECENCY_WEIGHT,
            frequency: defaults::DEFAULT_FREQUENCY_WEIGHT,
        }
    }
}

/// Scorer configuration: weights, decay rates, scale factors, tier thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: ScoreWeights,
    pub access_mix: AccessMix,
    /// Recency points lost per day since last touch.
    pub recency_decay_per_day: f64,
    /// Age points lost per day since creation.
    pub age_decay_per_day: f64,
    /// Frequency points per recorded access.
    pub frequency_per_access: f64,
    /// Connection points per semantic link.
    pub connection_per_link: f64,
    /// Importance used when a record carries none.
    pub default_importance: u8,
    /// Total score at or above which a record belongs in hot.
    pub hot_threshold: f64,
    /// Total score at or above which a record belongs in warm.
    pub warm_threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            access_mix: AccessMix::default(),
            recency_decay_per_day: defaults::DEFAULT_RECENCY_DECAY_PER_DAY,
            age_decay_per_day: defaults::DEFAULT_AGE_DECAY_PER_DAY,
            frequency_per_access: defaults::DEFAULT_FREQUENCY_PER_ACCESS,
            connection_per_link: defaults::DEFAULT_CONNECTION_PER_LINK,
            default_importance: defaults::DEFAULT_IMPORTANCE,
            hot_threshold: defaults::DEFAULT_HOT_THRESHOLD,
            warm_threshold: defaults::DEFAULT_WARM_THRESHOLD,
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.weights;
        for (field, value) in [
            ("scoring.weights.access", w.access),
            ("scoring.weights.importance", w.importance),
            ("scoring.weights.age", w.age),
            ("scoring.weights.connection", w.connection),
            ("scoring.access_mix.recency", self.access_mix.recency),
            ("scoring.access_mix.frequency", self.access_mix.frequency),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(field, format!("{value} is outside [0, 1]")));
            }
        }
        if (w.sum() - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(invalid(
                "scoring.weights",
                format!("weights sum to {}, expected 1.0", w.sum()),
            ));
        }
        let mix = self.access_mix.recency + self.access_mix.frequency;
        if (mix - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(invalid(
                "scoring.access_mix",
                format!("mix sums to {mix}, expected 1.0"),
            ));
        }
        for (field, value) in [
            ("scoring.recency_decay_per_day", self.recency_decay_per_day),
            ("scoring.age_decay_per_day", self.age_decay_per_day),
            ("scoring.frequency_per_access", self.frequency_per_access),
            ("scoring.connection_per_link", self.connection_per_link),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(field, format!("{value} must be a non-negative number")));
            }
        }
        if self.default_importance > MAX_IMPORTANCE {
            return Err(invalid(
                "scoring.default_importance",
                format!("{} exceeds {MAX_IMPORTANCE}", self.default_importance),
            ));
        }
        if self.warm_threshold > self.hot_threshold {
            return Err(invalid(
                "scoring.warm_threshold",
                format!(
                    "warm threshold {} is above hot threshold {}",
                    self.warm_threshold, self.hot_threshold
                ),
            ));
        }
        Ok(())
    }
}

pub(crate) fn invalid(field: &str, reason: String) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        reason,
    }
}
