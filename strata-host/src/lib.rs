//! # strata-host
//!
//! The execution host: a pool of worker threads fed by a bounded queue. Callers submit a
//! [`Task`] and receive a [`TaskHandle`]; each response carries the outcome and
//! [`TaskMetrics`]. Workers hold no state across tasks, convert every failure (panics
//! included) into a failed response, and never touch the record store.

pub mod cancellation;
pub mod executor;
pub mod host;
pub mod metrics;
mod pipeline;
pub mod task;
mod worker;

pub use cancellation::CancellationToken;
pub use executor::{ITaskExecutor, TaskExecutor};
pub use host::{ExecutionHost, TaskHandle, TaskResponse};
pub use metrics::{HostStats, TaskMetrics};
pub use task::{
    BatchScoreRequest, OptimizePlan, OptimizeRequest, PayloadFallback, PayloadUpdate,
    ScoreRequest, Task, TaskEnvelope, TaskKind, TaskOutput,
};
