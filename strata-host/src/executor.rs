//! What a worker runs for each task.

use strata_compaction::CompactionEngine;
use strata_core::errors::HostError;
use strata_core::StrataConfig;
use strata_rebalance::Rebalancer;
use strata_scoring::ScoringEngine;

use crate::cancellation::CancellationToken;
use crate::pipeline;
use crate::task::{Task, TaskOutput};

/// Executes one task to completion on the calling (worker) thread.
///
/// Implementations must hold no state that a task can leave half-updated: a timed-out
/// or panicking task must not affect the next one.
pub trait ITaskExecutor: Send + Sync {
    fn execute(&self, task: &Task, token: &CancellationToken) -> Result<TaskOutput, HostError>;
}

/// The production executor: scorer, rebalancer, and content transform.
#[derive(Debug, Clone, Default)]
pub struct TaskExecutor {
    pub(crate) scorer: ScoringEngine,
    pub(crate) rebalancer: Rebalancer,
    pub(crate) transform: CompactionEngine,
}

impl TaskExecutor {
    pub fn new(config: &StrataConfig) -> Self {
        Self {
            scorer: ScoringEngine::with_config(config.scoring.clone()),
            rebalancer: Rebalancer::with_config(config.rebalance.clone()),
            transform: CompactionEngine::with_config(config.compaction.clone()),
        }
    }
}

impl ITaskExecutor for TaskExecutor {
    fn execute(&self, task: &Task, token: &CancellationToken) -> Result<TaskOutput, HostError> {
        match task {
            Task::CalculateScore(req) => pipeline::calculate_score(self, req),
            Task::BatchCalculateScores(req) => pipeline::batch_calculate_scores(self, req, token),
            Task::Optimize(req) => pipeline::optimize(self, req, token),
            Task::Compress(value) => pipeline::compress(self, value),
            Task::Decompress(payload) => pipeline::decompress(self, payload),
        }
    }
}
