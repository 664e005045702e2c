use chrono::{DateTime, Utc};

use crate::errors::StrataResult;
use crate::models::Score;
use crate::record::Record;

/// Record scoring.
pub trait IScorer: Send + Sync {
    /// Score a record as of `now`. Pure and deterministic given `(record, now)`.
    fn score(&self, record: &Record, now: DateTime<Utc>) -> StrataResult<Score>;
}
