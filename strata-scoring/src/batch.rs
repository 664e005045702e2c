//! Batch scoring. Records are scored in parallel; output order matches input order.

use rayon::prelude::*;
use strata_core::config::ScoringConfig;
use strata_core::models::{ItemResult, Score};
use strata_core::record::Record;

use crate::factors::ScoringContext;
use crate::formula;

/// Below this many records the rayon fan-out costs more than it saves.
const PARALLEL_THRESHOLD: usize = 256;

/// Score one record, failing it alone when it does not validate.
pub fn score_item(record: &Record, ctx: &ScoringContext, config: &ScoringConfig) -> ItemResult<Score> {
    match record.validate() {
        Ok(()) => ItemResult::ok(record.id.clone(), formula::compute(record, ctx, config)),
        Err(e) => ItemResult::err(record.id.clone(), e.to_string()),
    }
}

/// Score every record. Invalid records yield per-item errors; the batch never aborts.
pub fn score_all(
    records: &[Record],
    ctx: &ScoringContext,
    config: &ScoringConfig,
) -> Vec<ItemResult<Score>> {
    if records.len() < PARALLEL_THRESHOLD {
        return records.iter().map(|r| score_item(r, ctx, config)).collect();
    }
    records
        .par_iter()
        .map(|r| score_item(r, ctx, config))
        .collect()
}
