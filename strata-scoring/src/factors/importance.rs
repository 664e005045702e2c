use strata_core::config::ScoringConfig;
use strata_core::record::Record;

use super::clamp_score;

/// Importance sub-score: the record's importance, already on the 0–100 scale.
/// Missing importance takes the configured default (50).
pub fn calculate(record: &Record, config: &ScoringConfig) -> f64 {
    let importance = record.importance.unwrap_or(config.default_importance);
    clamp_score(f64::from(importance))
}
