use strata_core::config::ScoringConfig;
use strata_core::record::Record;

use super::clamp_score;

/// Connection sub-score: `min(100, perLink × connectionCount)`.
pub fn calculate(record: &Record, config: &ScoringConfig) -> f64 {
    clamp_score(config.connection_per_link * record.connection_count as f64)
}
