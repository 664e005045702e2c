use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Execution host configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Worker threads. Also the concurrency limit for independent scoring tasks.
    pub workers: usize,
    /// Bounded queue depth in front of the workers.
    pub queue_capacity: usize,
    /// Wall-clock budget per task, in milliseconds.
    pub task_timeout_ms: u64,
}

impl HostConfig {
    pub fn task_timeout(&self) -> Duration {
        Duration::from_millis(self.task_timeout_ms)
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            workers: defaults::DEFAULT_HOST_WORKERS,
            queue_capacity: defaults::DEFAULT_HOST_QUEUE_CAPACITY,
            task_timeout_ms: defaults::DEFAULT_TASK_TIMEOUT_MS,
        }
    }
}
