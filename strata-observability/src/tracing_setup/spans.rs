//! Span definitions per operation: scoring, rebalancing, compaction, host tasks, optimization.

/// Create a scoring span.
#[macro_export]
macro_rules! scoring_span {
    ($record_count:expr) => {
        tracing::info_span!("strata.scoring", record_count = $record_count)
    };
}

/// Create a rebalance span.
#[macro_export]
macro_rules! rebalance_span {
    ($record_count:expr, $hot_capacity:expr, $warm_capacity:expr) => {
        tracing::info_span!(
            "strata.rebalance",
            record_count = $record_count,
            hot_capacity = $hot_capacity,
            warm_capacity = $warm_capacity
        )
    };
}

/// Create a compaction span.
#[macro_export]
macro_rules! compaction_span {
    ($direction:expr) => {
        tracing::debug_span!("strata.compaction", direction = %$direction)
    };
}

/// Create a host task span.
#[macro_export]
macro_rules! host_task_span {
    ($task_id:expr, $kind:expr) => {
        tracing::info_span!("strata.host_task", task_id = $task_id, kind = %$kind)
    };
}

/// Create an optimization span.
#[macro_export]
macro_rules! optimize_span {
    ($population:expr) => {
        tracing::info_span!("strata.optimize", population = %$population)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const SCORING: &str = "strata.scoring";
    pub const REBALANCE: &str = "strata.rebalance";
    pub const COMPACTION: &str = "strata.compaction";
    pub const HOST_TASK: &str = "strata.host_task";
    pub const OPTIMIZE: &str = "strata.optimize";
}
