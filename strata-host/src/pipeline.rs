//! Task pipelines. The optimize pipeline scores, rebalances, then transforms the
//! payloads of records whose transition crosses the cold boundary.

use std::collections::HashMap;

use strata_core::errors::HostError;
use strata_core::models::{SkippedRecord, TierCapacities, TierCounts, Transition};
use strata_core::record::{Payload, Record, Tier, TransformedPayload};
use strata_core::traits::IContentTransform;
use strata_observability::tracing_setup::events;
use strata_observability::{rebalance_span, scoring_span};
use strata_rebalance::RebalanceSummary;
use strata_scoring::ScoringContext;
use tracing::debug;

use crate::cancellation::CancellationToken;
use crate::executor::TaskExecutor;
use crate::task::{
    BatchScoreRequest, OptimizePlan, OptimizeRequest, PayloadFallback, PayloadUpdate,
    ScoreRequest, TaskKind, TaskOutput,
};

fn failed(kind: TaskKind, reason: impl ToString) -> HostError {
    HostError::TaskFailed {
        task: kind.to_string(),
        reason: reason.to_string(),
    }
}

fn check_cancelled(kind: TaskKind, token: &CancellationToken) -> Result<(), HostError> {
    if token.is_cancelled() {
        return Err(failed(kind, "cancelled"));
    }
    Ok(())
}

pub(crate) fn calculate_score(
    executor: &TaskExecutor,
    req: &ScoreRequest,
) -> Result<TaskOutput, HostError> {
    executor
        .scorer
        .score_with_context(&req.record, &ScoringContext::at(req.now))
        .map(TaskOutput::Score)
        .map_err(|e| failed(TaskKind::CalculateScore, e))
}

pub(crate) fn batch_calculate_scores(
    executor: &TaskExecutor,
    req: &BatchScoreRequest,
    token: &CancellationToken,
) -> Result<TaskOutput, HostError> {
    check_cancelled(TaskKind::BatchCalculateScores, token)?;
    let _span = scoring_span!(req.records.len()).entered();
    let scores = executor
        .scorer
        .score_batch(&req.records, &ScoringContext::at(req.now));
    Ok(TaskOutput::Scores(scores))
}

pub(crate) fn compress(
    executor: &TaskExecutor,
    value: &serde_json::Value,
) -> Result<TaskOutput, HostError> {
    executor
        .transform
        .demote(value)
        .map(TaskOutput::Compressed)
        .map_err(|e| failed(TaskKind::Compress, e))
}

pub(crate) fn decompress(
    executor: &TaskExecutor,
    payload: &TransformedPayload,
) -> Result<TaskOutput, HostError> {
    Ok(TaskOutput::Decompressed(executor.transform.promote(payload)))
}

/// Score (unless scores were supplied), rebalance, and prepare payload updates.
///
/// A demotion whose payload cannot be transformed is dropped from the plan and reported
/// as skipped; promotions into a tier it leaves over capacity are dropped too. A promotion
/// whose payload cannot be restored still applies; the payload stays as it is and the
/// fallback is reported.
pub(crate) fn optimize(
    executor: &TaskExecutor,
    req: &OptimizeRequest,
    token: &CancellationToken,
) -> Result<TaskOutput, HostError> {
    let kind = TaskKind::Optimize;
    check_cancelled(kind, token)?;

    let computed;
    let scores = match &req.scores {
        Some(scores) => scores.as_slice(),
        None => {
            let _span = scoring_span!(req.records.len()).entered();
            computed = executor
                .scorer
                .score_batch(&req.records, &ScoringContext::at(req.now))
                .into_iter()
                .filter_map(|item| item.result.ok())
                .collect::<Vec<_>>();
            computed.as_slice()
        }
    };
    check_cancelled(kind, token)?;

    let plan = {
        let _span =
            rebalance_span!(req.records.len(), req.capacities.hot, req.capacities.warm).entered();
        executor
            .rebalancer
            .rebalance(&req.records, scores, req.capacities, req.now)
    };
    check_cancelled(kind, token)?;

    let by_id: HashMap<&str, &Record> = req.records.iter().map(|r| (r.id.as_str(), r)).collect();
    let mut out = OptimizePlan {
        skipped: plan.skipped,
        summary: plan.summary,
        ..OptimizePlan::default()
    };
    let mut failed_demotions = Vec::new();

    for transition in plan.transitions {
        if !transition.crosses_cold_boundary() {
            out.transitions.push(transition);
            continue;
        }
        // The rebalancer only plans transitions for records it was given.
        let Some(record) = by_id.get(transition.record_id.as_str()) else {
            continue;
        };
        match transform_payload(executor, record, &transition) {
            Ok(Some(payload)) => {
                out.payload_updates.push(PayloadUpdate {
                    record_id: transition.record_id.clone(),
                    payload,
                });
                out.transitions.push(transition);
            }
            Ok(None) => out.transitions.push(transition),
            Err(PayloadIssue::Fallback(reason)) => {
                events::payload_fallback(Some(&transition.record_id), &reason);
                out.fallbacks.push(PayloadFallback {
                    record_id: transition.record_id.clone(),
                    reason,
                });
                out.transitions.push(transition);
            }
            Err(PayloadIssue::Failed(reason)) => {
                out.skipped
                    .push(SkippedRecord::new(transition.record_id.clone(), reason));
                failed_demotions.push(transition);
            }
        }
    }

    if !failed_demotions.is_empty() {
        let mut occupancy = out.summary.after;
        for transition in &failed_demotions {
            occupancy.decrement(transition.to_tier);
            occupancy.increment(transition.from_tier);
        }
        drop_overflowing_promotions(&mut out, &mut occupancy, req.capacities);
        out.summary = RebalanceSummary::new(out.summary.before, occupancy, &out.transitions);
    }

    debug!(
        transitions = out.transitions.len(),
        payload_updates = out.payload_updates.len(),
        fallbacks = out.fallbacks.len(),
        skipped = out.skipped.len(),
        "optimize plan ready"
    );
    Ok(TaskOutput::Plan(out))
}

/// Drop the lowest-ranked promotions into any tier that is over capacity because a
/// demotion out of it was dropped.
fn drop_overflowing_promotions(
    plan: &mut OptimizePlan,
    occupancy: &mut TierCounts,
    capacities: TierCapacities,
) {
    for (tier, capacity) in [(Tier::Hot, capacities.hot), (Tier::Warm, capacities.warm)] {
        while occupancy.get(tier) > capacity {
            let lowest = plan
                .transitions
                .iter()
                .enumerate()
                .filter(|(_, t)| t.to_tier == tier && t.is_promotion())
                .min_by(|(_, a), (_, b)| {
                    a.score
                        .total_cmp(&b.score)
                        .then_with(|| b.record_id.cmp(&a.record_id))
                })
                .map(|(index, _)| index);
            let Some(index) = lowest else {
                break;
            };

            let dropped = plan.transitions.remove(index);
            occupancy.decrement(dropped.to_tier);
            occupancy.increment(dropped.from_tier);
            plan.payload_updates.retain(|u| u.record_id != dropped.record_id);
            plan.fallbacks.retain(|f| f.record_id != dropped.record_id);
            plan.skipped.push(SkippedRecord::new(
                dropped.record_id,
                format!("no {tier} slot left after a failed demotion"),
            ));
        }
    }
}

enum PayloadIssue {
    Fallback(String),
    Failed(String),
}

/// `Ok(None)` when the payload is already in the target representation.
fn transform_payload(
    executor: &TaskExecutor,
    record: &Record,
    transition: &Transition,
) -> Result<Option<Payload>, PayloadIssue> {
    match (transition.to_tier, &record.payload) {
        (Tier::Cold, Payload::Plain(value)) => executor
            .transform
            .demote(value)
            .map(|cold| Some(Payload::Cold(cold)))
            .map_err(|e| PayloadIssue::Failed(format!("payload demotion failed: {e}"))),
        (Tier::Cold, Payload::Cold(_)) => Ok(None),
        (_, Payload::Cold(cold)) => {
            let outcome = executor.transform.promote(cold);
            match outcome.fallback {
                Some(reason) => Err(PayloadIssue::Fallback(reason)),
                None => Ok(Some(outcome.payload)),
            }
        }
        (_, Payload::Plain(_)) => Ok(None),
    }
}
