use strata_core::config::ScoringConfig;
use strata_core::models::Score;
use strata_core::record::{Record, Tier};

use crate::factors::{self, clamp_score, days_between, ScoringContext};
use crate::thresholds;

/// Weighted four-factor score.
///
/// ```text
/// total = 0.35 × access
///       + 0.30 × importance
///       + 0.20 × age
///       + 0.15 × connection
/// ```
///
/// Every sub-score and the total are clamped to [0, 100].
pub fn compute(record: &Record, ctx: &ScoringContext, config: &ScoringConfig) -> Score {
    let access = factors::access::calculate(record, ctx, config);
    let importance = factors::importance::calculate(record, config);
    let age = factors::age::calculate(record, ctx, config);
    let connection = factors::connection::calculate(record, config);

    let total = weighted_total(access, importance, age, connection, config);

    Score {
        record_id: record.id.clone(),
        access,
        importance,
        age,
        connection,
        total,
        recommended_tier: thresholds::recommend_tier(total, config),
    }
}

fn weighted_total(
    access: f64,
    importance: f64,
    age: f64,
    connection: f64,
    config: &ScoringConfig,
) -> f64 {
    let w = &config.weights;
    clamp_score(
        w.access * access + w.importance * importance + w.age * age + w.connection * connection,
    )
}

/// Every intermediate value, for debugging and observability.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub age_days: f64,
    pub recency_gap_days: f64,
    pub recency: f64,
    pub frequency: f64,
    pub access: f64,
    pub importance: f64,
    pub age: f64,
    pub connection: f64,
    pub total: f64,
    pub recommended_tier: Tier,
}

/// Compute the score with a full breakdown of each factor.
pub fn compute_breakdown(
    record: &Record,
    ctx: &ScoringContext,
    config: &ScoringConfig,
) -> ScoreBreakdown {
    let recency = factors::access::recency(record, ctx, config);
    let frequency = factors::access::frequency(record, config);
    let access = factors::access::calculate(record, ctx, config);
    let importance = factors::importance::calculate(record, config);
    let age = factors::age::calculate(record, ctx, config);
    let connection = factors::connection::calculate(record, config);
    let total = weighted_total(access, importance, age, connection, config);

    ScoreBreakdown {
        age_days: days_between(record.created_at, ctx.now),
        recency_gap_days: days_between(record.last_touched_at(), ctx.now),
        recency,
        frequency,
        access,
        importance,
        age,
        connection,
        total,
        recommended_tier: thresholds::recommend_tier(total, config),
    }
}
