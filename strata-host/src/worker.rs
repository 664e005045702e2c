//! Worker thread main loop.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender};
use strata_core::errors::HostError;
use strata_observability::host_task_span;
use strata_observability::tracing_setup::events;
use tracing::debug;

use crate::cancellation::CancellationToken;
use crate::executor::ITaskExecutor;
use crate::host::TaskResponse;
use crate::metrics::{HostCounters, TaskMetrics};
use crate::task::Task;

/// A queued submission with its private reply channel.
pub(crate) struct Job {
    pub id: u64,
    pub task: Task,
    pub token: CancellationToken,
    pub reply: Sender<TaskResponse>,
}

/// Serve jobs until every sender is gone and the queue is drained.
pub(crate) fn run(
    worker_id: usize,
    jobs: Receiver<Job>,
    executor: Arc<dyn ITaskExecutor>,
    counters: Arc<HostCounters>,
) {
    debug!(worker_id, "worker started");
    for job in jobs.iter() {
        let kind = job.task.kind();
        let _span = host_task_span!(job.id, kind).entered();

        if job.token.is_cancelled() {
            debug!(task_id = job.id, "task abandoned before start");
            continue;
        }

        let started = Instant::now();
        let input_bytes = job.task.estimated_bytes();
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            executor.execute(&job.task, &job.token)
        }));

        let (outcome, panicked) = match result {
            Ok(outcome) => (outcome, false),
            Err(panic) => (
                Err(HostError::TaskPanicked {
                    task: kind.to_string(),
                    message: panic_message(panic.as_ref()),
                }),
                true,
            ),
        };

        let output_bytes = outcome.as_ref().map_or(0, |out| out.estimated_bytes());
        let metrics = TaskMetrics {
            processing_time_ms: started.elapsed().as_millis() as u64,
            memory_delta_bytes: output_bytes as i64 - input_bytes as i64,
            items_processed: job.task.item_count(),
        };

        // An abandoned task was already accounted for by whoever cancelled it.
        let abandoned = job.token.is_cancelled();
        match &outcome {
            Ok(_) if abandoned => debug!(task_id = job.id, "abandoned task finished"),
            Ok(_) => counters.record_succeeded(),
            Err(e) => {
                if !abandoned {
                    counters.record_failed(panicked);
                }
                events::task_failed(job.id, kind.as_str(), &e.to_string());
            }
        }

        // The caller may have stopped waiting; nothing to do then.
        let _ = job.reply.send(TaskResponse {
            task_id: job.id,
            kind,
            outcome,
            metrics,
        });
    }
    debug!(worker_id, "worker stopped");
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
