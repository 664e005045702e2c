/// Execution host errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("task {task} timed out after {timeout_ms}ms")]
    Timeout { task: String, timeout_ms: u64 },

    #[error("worker unavailable: {reason}")]
    WorkerUnavailable { reason: String },

    #[error("unknown task kind: {kind}")]
    UnknownTask { kind: String },

    #[error("malformed {kind} task: {reason}")]
    MalformedTask { kind: String, reason: String },

    #[error("task {task} failed: {reason}")]
    TaskFailed { task: String, reason: String },

    #[error("task {task} panicked: {message}")]
    TaskPanicked { task: String, message: String },

    #[error("task {task} returned {actual}, expected {expected}")]
    UnexpectedOutput {
        task: String,
        expected: String,
        actual: String,
    },
}
