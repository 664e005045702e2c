//! The closed set of host tasks, their outputs, and the string-keyed envelope they are
//! decoded from at the message boundary.

use std::fmt;
use std::mem;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strata_core::errors::HostError;
use strata_core::models::{ItemResult, Score, SkippedRecord, TierCapacities, Transition};
use strata_core::record::{estimate_value_bytes, Payload, Record, TransformedPayload};
use strata_core::traits::PromoteOutcome;
use strata_rebalance::RebalanceSummary;

/// Task discriminant, spelled in snake_case on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    CalculateScore,
    BatchCalculateScores,
    Optimize,
    Compress,
    Decompress,
}

impl TaskKind {
    pub const ALL: [TaskKind; 5] = [
        Self::CalculateScore,
        Self::BatchCalculateScores,
        Self::Optimize,
        Self::Compress,
        Self::Decompress,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CalculateScore => "calculate_score",
            Self::BatchCalculateScores => "batch_calculate_scores",
            Self::Optimize => "optimize",
            Self::Compress => "compress",
            Self::Decompress => "decompress",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskKind {
    type Err = HostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| HostError::UnknownTask {
                kind: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub record: Record,
    #[serde(default = "Utc::now")]
    pub now: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchScoreRequest {
    pub records: Vec<Record>,
    #[serde(default = "Utc::now")]
    pub now: DateTime<Utc>,
}

/// A full optimization pass over one population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeRequest {
    pub records: Vec<Record>,
    /// Precomputed scores. When absent the worker scores the records itself.
    #[serde(default)]
    pub scores: Option<Vec<Score>>,
    pub capacities: TierCapacities,
    #[serde(default = "Utc::now")]
    pub now: DateTime<Utc>,
}

/// A unit of work for the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    CalculateScore(ScoreRequest),
    BatchCalculateScores(BatchScoreRequest),
    Optimize(OptimizeRequest),
    Compress(serde_json::Value),
    Decompress(TransformedPayload),
}

impl Task {
    pub fn kind(&self) -> TaskKind {
        match self {
            Self::CalculateScore(_) => TaskKind::CalculateScore,
            Self::BatchCalculateScores(_) => TaskKind::BatchCalculateScores,
            Self::Optimize(_) => TaskKind::Optimize,
            Self::Compress(_) => TaskKind::Compress,
            Self::Decompress(_) => TaskKind::Decompress,
        }
    }

    /// Number of items the task works through.
    pub fn item_count(&self) -> usize {
        match self {
            Self::BatchCalculateScores(req) => req.records.len(),
            Self::Optimize(req) => req.records.len(),
            _ => 1,
        }
    }

    pub(crate) fn estimated_bytes(&self) -> usize {
        match self {
            Self::CalculateScore(req) => req.record.estimated_bytes(),
            Self::BatchCalculateScores(req) => req.records.iter().map(Record::estimated_bytes).sum(),
            Self::Optimize(req) => {
                req.records.iter().map(Record::estimated_bytes).sum::<usize>()
                    + req.scores.as_ref().map_or(0, |s| s.len() * mem::size_of::<Score>())
            }
            Self::Compress(value) => estimate_value_bytes(value),
            Self::Decompress(payload) => payload.len(),
        }
    }
}

/// String-keyed task as it arrives from a caller: `{ "kind": "...", "payload": {...} }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskEnvelope {
    pub kind: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl TaskEnvelope {
    pub fn new(kind: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }

    /// Encode a typed task.
    pub fn encode(task: &Task) -> Result<Self, HostError> {
        let kind = task.kind();
        let payload = match task {
            Task::CalculateScore(req) => serde_json::to_value(req),
            Task::BatchCalculateScores(req) => serde_json::to_value(req),
            Task::Optimize(req) => serde_json::to_value(req),
            Task::Compress(value) => Ok(value.clone()),
            Task::Decompress(payload) => serde_json::to_value(payload),
        }
        .map_err(|e| HostError::MalformedTask {
            kind: kind.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::new(kind.as_str(), payload))
    }

    /// Decode into the closed task set. Unknown kinds and payloads that do not fit the
    /// kind's shape are rejected here.
    pub fn decode(self) -> Result<Task, HostError> {
        let kind: TaskKind = self.kind.parse()?;
        let malformed = |e: serde_json::Error| HostError::MalformedTask {
            kind: kind.to_string(),
            reason: e.to_string(),
        };
        match kind {
            TaskKind::CalculateScore => serde_json::from_value(self.payload)
                .map(Task::CalculateScore)
                .map_err(malformed),
            TaskKind::BatchCalculateScores => serde_json::from_value(self.payload)
                .map(Task::BatchCalculateScores)
                .map_err(malformed),
            TaskKind::Optimize => serde_json::from_value(self.payload)
                .map(Task::Optimize)
                .map_err(malformed),
            TaskKind::Compress => Ok(Task::Compress(self.payload)),
            TaskKind::Decompress => serde_json::from_value(self.payload)
                .map(Task::Decompress)
                .map_err(malformed),
        }
    }
}

impl TryFrom<TaskEnvelope> for Task {
    type Error = HostError;

    fn try_from(envelope: TaskEnvelope) -> Result<Self, Self::Error> {
        envelope.decode()
    }
}

/// New payload for a record whose transition crosses the cold boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadUpdate {
    pub record_id: String,
    pub payload: Payload,
}

/// A promotion whose payload could not be restored and was kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadFallback {
    pub record_id: String,
    pub reason: String,
}

/// Everything the caller needs to apply one optimization pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptimizePlan {
    pub transitions: Vec<Transition>,
    pub payload_updates: Vec<PayloadUpdate>,
    pub skipped: Vec<SkippedRecord>,
    pub fallbacks: Vec<PayloadFallback>,
    pub summary: RebalanceSummary,
}

impl OptimizePlan {
    /// The new payload to write with this record's transition, if any.
    pub fn payload_for(&self, record_id: &str) -> Option<&Payload> {
        self.payload_updates
            .iter()
            .find(|u| u.record_id == record_id)
            .map(|u| &u.payload)
    }
}

/// Successful task output, one variant per task kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "result", rename_all = "snake_case")]
pub enum TaskOutput {
    Score(Score),
    Scores(Vec<ItemResult<Score>>),
    Plan(OptimizePlan),
    Compressed(TransformedPayload),
    Decompressed(PromoteOutcome),
}

impl TaskOutput {
    fn name(&self) -> &'static str {
        match self {
            Self::Score(_) => "score",
            Self::Scores(_) => "scores",
            Self::Plan(_) => "plan",
            Self::Compressed(_) => "compressed",
            Self::Decompressed(_) => "decompressed",
        }
    }

    fn unexpected(self, task: TaskKind, expected: &str) -> HostError {
        HostError::UnexpectedOutput {
            task: task.to_string(),
            expected: expected.to_string(),
            actual: self.name().to_string(),
        }
    }

    pub fn into_score(self) -> Result<Score, HostError> {
        match self {
            Self::Score(score) => Ok(score),
            other => Err(other.unexpected(TaskKind::CalculateScore, "score")),
        }
    }

    pub fn into_scores(self) -> Result<Vec<ItemResult<Score>>, HostError> {
        match self {
            Self::Scores(scores) => Ok(scores),
            other => Err(other.unexpected(TaskKind::BatchCalculateScores, "scores")),
        }
    }

    pub fn into_plan(self) -> Result<OptimizePlan, HostError> {
        match self {
            Self::Plan(plan) => Ok(plan),
            other => Err(other.unexpected(TaskKind::Optimize, "plan")),
        }
    }

    pub fn into_compressed(self) -> Result<TransformedPayload, HostError> {
        match self {
            Self::Compressed(payload) => Ok(payload),
            other => Err(other.unexpected(TaskKind::Compress, "compressed")),
        }
    }

    pub fn into_decompressed(self) -> Result<PromoteOutcome, HostError> {
        match self {
            Self::Decompressed(outcome) => Ok(outcome),
            other => Err(other.unexpected(TaskKind::Decompress, "decompressed")),
        }
    }

    pub(crate) fn estimated_bytes(&self) -> usize {
        let score_bytes = |s: &Score| mem::size_of::<Score>() + s.record_id.len();
        match self {
            Self::Score(score) => score_bytes(score),
            Self::Scores(items) => items
                .iter()
                .map(|item| match &item.result {
                    Ok(score) => score_bytes(score),
                    Err(e) => item.record_id.len() + e.len(),
                })
                .sum(),
            Self::Plan(plan) => {
                plan.transitions.len() * mem::size_of::<Transition>()
                    + plan
                        .payload_updates
                        .iter()
                        .map(|u| u.record_id.len() + u.payload.estimated_bytes())
                        .sum::<usize>()
            }
            Self::Compressed(payload) => payload.len() + payload.checksum.len(),
            Self::Decompressed(outcome) => outcome.payload.estimated_bytes(),
        }
    }
}
