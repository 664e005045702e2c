//! Structured log events for tier movement and task execution.
//!
//! Each function emits a `tracing` event with structured fields.

use strata_core::models::Transition;

/// Log an applied tier transition.
pub fn transition_applied(population: &str, transition: &Transition) {
    tracing::info!(
        event = "transition_applied",
        population = %population,
        record_id = %transition.record_id,
        from = %transition.from_tier,
        to = %transition.to_tier,
        reason = %transition.reason,
        score = transition.score,
        "transition applied"
    );
}

/// Log a transition that was planned but not applied.
pub fn transition_skipped(population: &str, record_id: &str, reason: &str) {
    tracing::info!(
        event = "transition_skipped",
        population = %population,
        record_id = %record_id,
        reason = %reason,
        "transition skipped"
    );
}

/// Log a promote that returned its input verbatim. This is a data-integrity warning.
pub fn payload_fallback(record_id: Option<&str>, reason: &str) {
    tracing::warn!(
        event = "payload_fallback",
        record_id = record_id.unwrap_or("-"),
        reason = %reason,
        "payload promote fell back to verbatim input"
    );
}

/// Log a failed host task.
pub fn task_failed(task_id: u64, kind: &str, error: &str) {
    tracing::warn!(
        event = "task_failed",
        task_id = task_id,
        kind = %kind,
        error = %error,
        "host task failed"
    );
}

/// Log a host task abandoned after its timeout.
pub fn task_timed_out(task_id: u64, kind: &str, timeout_ms: u64) {
    tracing::warn!(
        event = "task_timed_out",
        task_id = task_id,
        kind = %kind,
        timeout_ms = timeout_ms,
        "host task timed out"
    );
}

/// Log a completed optimization pass.
pub fn optimization_completed(
    population: &str,
    applied: usize,
    skipped: usize,
    fallbacks: usize,
    processing_time_ms: u64,
) {
    tracing::info!(
        event = "optimization_completed",
        population = %population,
        applied = applied,
        skipped = skipped,
        fallbacks = fallbacks,
        processing_time_ms = processing_time_ms,
        "optimization completed"
    );
}
