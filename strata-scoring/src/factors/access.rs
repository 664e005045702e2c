use strata_core::config::ScoringConfig;
use strata_core::record::Record;

use super::{clamp_score, days_between, ScoringContext};

/// Recency: `max(0, 100 - decay × daysSinceLastTouch)`.
///
/// A never-accessed record is measured from its creation time.
pub fn recency(record: &Record, ctx: &ScoringContext, config: &ScoringConfig) -> f64 {
    let gap_days = days_between(record.last_touched_at(), ctx.now);
    clamp_score(100.0 - config.recency_decay_per_day * gap_days)
}

/// Frequency: `min(100, perAccess × accessCount)`.
pub fn frequency(record: &Record, config: &ScoringConfig) -> f64 {
    clamp_score(config.frequency_per_access * record.access_count as f64)
}

/// Access sub-score: `0.6 × recency + 0.4 × frequency` with the default mix.
pub fn calculate(record: &Record, ctx: &ScoringContext, config: &ScoringConfig) -> f64 {
    let mix = &config.access_mix;
    clamp_score(mix.recency * recency(record, ctx, config) + mix.frequency * frequency(record, config))
}
