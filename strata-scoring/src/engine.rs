use chrono::{DateTime, Utc};
use strata_core::config::ScoringConfig;
use strata_core::errors::StrataResult;
use strata_core::models::{ItemResult, Score};
use strata_core::record::Record;
use strata_core::traits::IScorer;
use tracing::debug;

use crate::batch;
use crate::factors::ScoringContext;
use crate::formula::{self, ScoreBreakdown};

/// Scoring engine implementing the weighted four-factor formula.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    /// Create a ScoringEngine with the default weights and thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom weights, decay rates, and thresholds.
    pub fn with_config(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score a record against an explicit context.
    pub fn score_with_context(&self, record: &Record, ctx: &ScoringContext) -> StrataResult<Score> {
        record.validate()?;
        Ok(formula::compute(record, ctx, &self.config))
    }

    /// Score a record with a full breakdown of each factor.
    pub fn calculate_breakdown(
        &self,
        record: &Record,
        ctx: &ScoringContext,
    ) -> StrataResult<ScoreBreakdown> {
        record.validate()?;
        Ok(formula::compute_breakdown(record, ctx, &self.config))
    }

    /// Score a batch. Each invalid record fails on its own.
    pub fn score_batch(&self, records: &[Record], ctx: &ScoringContext) -> Vec<ItemResult<Score>> {
        let results = batch::score_all(records, ctx, &self.config);
        debug!(
            count = results.len(),
            failed = results.iter().filter(|r| !r.is_ok()).count(),
            "scored batch"
        );
        results
    }
}

impl IScorer for ScoringEngine {
    fn score(&self, record: &Record, now: DateTime<Utc>) -> StrataResult<Score> {
        self.score_with_context(record, &ScoringContext::at(now))
    }
}
