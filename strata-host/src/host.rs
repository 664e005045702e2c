//! ExecutionHost: bounded queue in front of a fixed pool of worker threads.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TrySendError};
use serde::{Deserialize, Serialize};
use strata_core::config::HostConfig;
use strata_core::errors::{HostError, StrataResult};
use strata_core::StrataConfig;
use strata_observability::tracing_setup::events;
use tracing::{info, warn};

use crate::cancellation::CancellationToken;
use crate::executor::{ITaskExecutor, TaskExecutor};
use crate::metrics::{HostCounters, HostStats, TaskMetrics};
use crate::task::{Task, TaskEnvelope, TaskKind, TaskOutput};
use crate::worker::{self, Job};

/// Response for one task: the outcome plus resource metrics, success or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskResponse {
    pub task_id: u64,
    pub kind: TaskKind,
    #[serde(with = "outcome_serde")]
    pub outcome: Result<TaskOutput, HostError>,
    pub metrics: TaskMetrics,
}

impl TaskResponse {
    pub fn success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn error(&self) -> Option<&HostError> {
        self.outcome.as_ref().err()
    }

    pub fn into_output(self) -> Result<TaskOutput, HostError> {
        self.outcome
    }
}

/// Pending result of a submitted task.
#[derive(Debug)]
pub struct TaskHandle {
    id: u64,
    kind: TaskKind,
    reply: Receiver<TaskResponse>,
    token: CancellationToken,
    default_timeout: Duration,
    counters: Arc<HostCounters>,
}

impl TaskHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> TaskKind {
        self.kind
    }

    /// Wait up to the configured task timeout.
    pub fn wait(self) -> Result<TaskResponse, HostError> {
        let timeout = self.default_timeout;
        self.wait_timeout(timeout)
    }

    /// Wait up to `timeout`. On expiry the task is cancelled and abandoned; its worker
    /// moves on to the next job once the current stage returns.
    pub fn wait_timeout(self, timeout: Duration) -> Result<TaskResponse, HostError> {
        match self.reply.recv_timeout(timeout) {
            Ok(response) => Ok(response),
            Err(RecvTimeoutError::Timeout) => {
                self.token.cancel();
                self.counters.record_timed_out();
                let timeout_ms = timeout.as_millis() as u64;
                events::task_timed_out(self.id, self.kind.as_str(), timeout_ms);
                Err(HostError::Timeout {
                    task: self.kind.to_string(),
                    timeout_ms,
                })
            }
            Err(RecvTimeoutError::Disconnected) => Err(HostError::WorkerUnavailable {
                reason: format!("worker dropped task {} without replying", self.id),
            }),
        }
    }

    /// Stop waiting and ask the worker to abandon the task.
    pub fn cancel(&self) {
        self.token.cancel();
    }
}

/// Runs tasks on a pool of worker threads. Workers share nothing but the job queue.
pub struct ExecutionHost {
    config: HostConfig,
    jobs: Option<Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
    counters: Arc<HostCounters>,
    next_id: AtomicU64,
}

impl ExecutionHost {
    /// Start a host running the production executor.
    pub fn new(config: &StrataConfig) -> StrataResult<Self> {
        Self::with_executor(config.host.clone(), Arc::new(TaskExecutor::new(config)))
    }

    /// Start a host running a custom executor.
    pub fn with_executor(
        config: HostConfig,
        executor: Arc<dyn ITaskExecutor>,
    ) -> StrataResult<Self> {
        if config.workers == 0 || config.queue_capacity == 0 {
            return Err(HostError::WorkerUnavailable {
                reason: "host needs at least one worker and a non-empty queue".to_string(),
            }
            .into());
        }

        let (sender, receiver) = crossbeam_channel::bounded::<Job>(config.queue_capacity);
        let counters = Arc::new(HostCounters::default());
        let mut host = Self {
            config,
            jobs: Some(sender),
            workers: Vec::new(),
            counters,
            next_id: AtomicU64::new(1),
        };

        for worker_id in 0..host.config.workers {
            let jobs = receiver.clone();
            let executor = Arc::clone(&executor);
            let counters = Arc::clone(&host.counters);
            let handle = thread::Builder::new()
                .name(format!("strata-worker-{worker_id}"))
                .spawn(move || worker::run(worker_id, jobs, executor, counters))
                .map_err(|e| HostError::WorkerUnavailable {
                    reason: format!("failed to spawn worker {worker_id}: {e}"),
                })?;
            host.workers.push(handle);
        }

        info!(
            workers = host.config.workers,
            queue_capacity = host.config.queue_capacity,
            "execution host started"
        );
        Ok(host)
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Number of worker threads. Also the concurrency limit for independent tasks.
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Queue a task. Fails fast when the queue is full or the host is shut down.
    pub fn submit(&self, task: Task) -> Result<TaskHandle, HostError> {
        let sender = self.jobs.as_ref().ok_or_else(|| HostError::WorkerUnavailable {
            reason: "host is shut down".to_string(),
        })?;

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let kind = task.kind();
        let token = CancellationToken::new();
        let (reply_tx, reply_rx) = crossbeam_channel::bounded(1);
        let job = Job {
            id,
            task,
            token: token.clone(),
            reply: reply_tx,
        };

        sender.try_send(job).map_err(|e| match e {
            TrySendError::Full(_) => HostError::WorkerUnavailable {
                reason: format!("task queue is full ({} queued)", self.config.queue_capacity),
            },
            TrySendError::Disconnected(_) => HostError::WorkerUnavailable {
                reason: "all workers have stopped".to_string(),
            },
        })?;
        self.counters.record_submitted();

        Ok(TaskHandle {
            id,
            kind,
            reply: reply_rx,
            token,
            default_timeout: self.config.task_timeout(),
            counters: Arc::clone(&self.counters),
        })
    }

    /// Decode a string-keyed envelope and queue it. An unknown kind or a payload that does
    /// not fit the kind fails this submission only; the host keeps serving.
    pub fn submit_envelope(&self, envelope: TaskEnvelope) -> Result<TaskHandle, HostError> {
        let kind = envelope.kind.clone();
        envelope.decode().map_or_else(
            |e| {
                self.counters.record_submitted();
                self.counters.record_failed(false);
                events::task_failed(0, &kind, &e.to_string());
                Err(e)
            },
            |task| self.submit(task),
        )
    }

    /// Submit and wait up to the configured task timeout.
    pub fn execute(&self, task: Task) -> Result<TaskResponse, HostError> {
        self.submit(task)?.wait()
    }

    pub fn stats(&self) -> HostStats {
        self.counters.snapshot()
    }

    /// Stop accepting tasks, let the workers drain the queue, and join them.
    pub fn shutdown(&mut self) {
        if self.jobs.take().is_none() {
            return;
        }
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                warn!("worker thread exited abnormally");
            }
        }
        info!("execution host stopped");
    }
}

impl Drop for ExecutionHost {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Serializes the outcome as `{ "success": bool, "result" | "error": ... }`.
mod outcome_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use strata_core::errors::HostError;

    use crate::task::TaskOutput;

    #[derive(Serialize, Deserialize)]
    struct Wire {
        success: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        result: Option<TaskOutput>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    }

    pub fn serialize<S: Serializer>(
        outcome: &Result<TaskOutput, HostError>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let wire = match outcome {
            Ok(output) => Wire {
                success: true,
                result: Some(output.clone()),
                error: None,
            },
            Err(e) => Wire {
                success: false,
                result: None,
                error: Some(e.to_string()),
            },
        };
        wire.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Result<TaskOutput, HostError>, D::Error> {
        let wire = Wire::deserialize(deserializer)?;
        match (wire.success, wire.result) {
            (true, Some(output)) => Ok(Ok(output)),
            (_, _) => Ok(Err(HostError::TaskFailed {
                task: "remote".to_string(),
                reason: wire.error.unwrap_or_else(|| "missing result".to_string()),
            })),
        }
    }
}
