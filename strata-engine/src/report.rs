use serde::{Deserialize, Serialize};
use strata_core::models::{SkippedRecord, Transition};
use strata_host::{PayloadFallback, TaskMetrics};

/// Outcome of one applied optimization pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationReport {
    pub population: String,
    /// Records read from the store for this pass.
    pub records_considered: usize,
    /// Transitions written back to the store.
    pub applied: Vec<Transition>,
    /// Records the pass could not evaluate or whose transition was not applied.
    pub skipped: Vec<SkippedRecord>,
    /// Promotions applied with the payload kept verbatim.
    pub fallbacks: Vec<PayloadFallback>,
    /// Host metrics for the optimize task.
    pub metrics: TaskMetrics,
}

impl OptimizationReport {
    pub fn applied_count(&self) -> usize {
        self.applied.len()
    }

    pub fn is_noop(&self) -> bool {
        self.applied.is_empty()
    }
}
