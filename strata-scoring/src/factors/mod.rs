pub mod access;
pub mod age;
pub mod connection;
pub mod importance;

use chrono::{DateTime, Utc};
use strata_core::constants::{SCORE_MAX, SCORE_MIN, SECONDS_PER_DAY};

/// Context needed to compute all factors for a record.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext {
    /// Reference timestamp. Scores are deterministic given `(record, now)`.
    pub now: DateTime<Utc>,
}

impl ScoringContext {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Default for ScoringContext {
    fn default() -> Self {
        Self { now: Utc::now() }
    }
}

/// Clamp a sub-score into [0, 100]. NaN collapses to 0.
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        return SCORE_MIN;
    }
    value.clamp(SCORE_MIN, SCORE_MAX)
}

/// Fractional days from `since` to `now`. Timestamps in the future count as 0.
pub fn days_between(since: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let millis = (now - since).num_milliseconds().max(0) as f64;
    millis / 1000.0 / SECONDS_PER_DAY
}
