use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Outcome for one item of a batch. A failed item never aborts the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemResult<T> {
    pub record_id: String,
    pub result: Result<T, String>,
}

impl<T> ItemResult<T> {
    pub fn ok(record_id: impl Into<String>, value: T) -> Self {
        Self {
            record_id: record_id.into(),
            result: Ok(value),
        }
    }

    pub fn err(record_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            record_id: record_id.into(),
            result: Err(error.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn value(&self) -> Option<&T> {
        self.result.as_ref().ok()
    }
}

/// A record left out of a pass, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SkippedRecord {
    pub record_id: String,
    pub reason: String,
}

impl SkippedRecord {
    pub fn new(record_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            record_id: record_id.into(),
            reason: reason.into(),
        }
    }
}
