use strata_core::config::ScoringConfig;
use strata_core::record::Record;

use super::{clamp_score, days_between, ScoringContext};

/// Age sub-score: `max(0, 100 - decay × daysSinceCreation)`.
///
/// Independent of access: an old record keeps losing age points even when it is read daily.
pub fn calculate(record: &Record, ctx: &ScoringContext, config: &ScoringConfig) -> f64 {
    let age_days = days_between(record.created_at, ctx.now);
    clamp_score(100.0 - config.age_decay_per_day * age_days)
}
