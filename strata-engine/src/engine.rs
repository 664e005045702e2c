//! TierEngine: the caller-facing façade over the store and the execution host.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use strata_core::errors::{HostError, StrataError, StrataResult};
use strata_core::models::{
    ItemResult, Score, SkippedRecord, TierCapacities, TierCounts, Transition, TransitionReason,
};
use strata_core::record::{Payload, Record, Tier, TransformedPayload};
use strata_core::traits::{IRecordStore, PromoteOutcome, RecordFilter};
use strata_core::StrataConfig;
use strata_host::{
    BatchScoreRequest, ExecutionHost, HostStats, OptimizePlan, OptimizeRequest, ScoreRequest,
    Task, TaskOutput, TaskResponse,
};
use strata_observability::optimize_span;
use strata_observability::tracing_setup::events;
use tracing::{debug, info};

use crate::locks::PopulationLocks;
use crate::report::OptimizationReport;

/// Orchestrates scoring, rebalancing, and payload transforms against an external store.
pub struct TierEngine {
    store: Arc<dyn IRecordStore>,
    host: ExecutionHost,
    config: StrataConfig,
    locks: PopulationLocks,
}

impl TierEngine {
    /// Validate the config and start the execution host.
    pub fn new(store: Arc<dyn IRecordStore>, config: StrataConfig) -> StrataResult<Self> {
        config.validate()?;
        let host = ExecutionHost::new(&config)?;
        Ok(Self::with_host(store, config, host))
    }

    /// Use an already running host.
    pub fn with_host(
        store: Arc<dyn IRecordStore>,
        config: StrataConfig,
        host: ExecutionHost,
    ) -> Self {
        Self {
            store,
            host,
            config,
            locks: PopulationLocks::new(),
        }
    }

    pub fn config(&self) -> &StrataConfig {
        &self.config
    }

    pub fn host_stats(&self) -> HostStats {
        self.host.stats()
    }

    pub fn is_optimizing(&self, population: &str) -> bool {
        self.locks.is_locked(population)
    }

    // ── Caller API ──────────────────────────────────────────────────────

    pub fn calculate_score(&self, record: &Record) -> StrataResult<Score> {
        self.calculate_score_at(record, Utc::now())
    }

    pub fn calculate_score_at(&self, record: &Record, now: DateTime<Utc>) -> StrataResult<Score> {
        let task = Task::CalculateScore(ScoreRequest {
            record: record.clone(),
            now,
        });
        Ok(self.run(task)?.into_score()?)
    }

    pub fn batch_calculate_scores(
        &self,
        records: &[Record],
    ) -> StrataResult<Vec<ItemResult<Score>>> {
        self.batch_calculate_scores_at(records, Utc::now())
    }

    /// Score a batch. The batch is split into one chunk per worker, the chunks run
    /// concurrently, and the results are reassembled in input order.
    pub fn batch_calculate_scores_at(
        &self,
        records: &[Record],
        now: DateTime<Utc>,
    ) -> StrataResult<Vec<ItemResult<Score>>> {
        if records.is_empty() {
            return Ok(Vec::new());
        }
        let workers = self.host.worker_count().max(1);
        let chunk_size = records.len().div_ceil(workers);

        let handles = records
            .chunks(chunk_size)
            .map(|chunk| {
                self.host.submit(Task::BatchCalculateScores(BatchScoreRequest {
                    records: chunk.to_vec(),
                    now,
                }))
            })
            .collect::<Result<Vec<_>, HostError>>()?;

        let mut scores = Vec::with_capacity(records.len());
        for handle in handles {
            let output = into_output(handle.wait()?)?;
            scores.extend(output.into_scores()?);
        }
        Ok(scores)
    }

    /// Plan transitions for the given records and scores. Nothing is written.
    ///
    /// The plan carries the transitions that could be computed plus every record that was
    /// skipped, with its reason.
    pub fn optimize(
        &self,
        records: &[Record],
        scores: &[Score],
        capacities: TierCapacities,
    ) -> StrataResult<OptimizePlan> {
        self.plan(records.to_vec(), Some(scores.to_vec()), capacities, Utc::now())
    }

    pub fn demote(&self, value: &serde_json::Value) -> StrataResult<TransformedPayload> {
        Ok(self.run(Task::Compress(value.clone()))?.into_compressed()?)
    }

    /// Restore a cold payload. Corrupt input comes back verbatim with the fallback flag set.
    pub fn promote(&self, payload: &TransformedPayload) -> StrataResult<PromoteOutcome> {
        Ok(self.run(Task::Decompress(payload.clone()))?.into_decompressed()?)
    }

    // ── Store-backed operations ─────────────────────────────────────────

    /// Run a full optimization pass over one population and apply it.
    ///
    /// Fails fast with `OptimizationInProgress` when another pass holds the population.
    /// A timed-out or failed optimize task applies nothing. Each planned transition is
    /// applied only if the record is still in the tier the pass saw and, when the pass
    /// rewrites its payload, still holds the payload the pass saw.
    pub fn run_optimization(
        &self,
        population: &str,
        filter: RecordFilter,
    ) -> StrataResult<OptimizationReport> {
        let _guard = self.locks.try_acquire(population)?;
        let _span = optimize_span!(population).entered();
        let started = Instant::now();

        let filter = RecordFilter {
            population: Some(population.to_string()),
            ..filter
        };
        let records = self.store.get_all(&filter)?;
        let records_considered = records.len();
        debug!(population, records = records_considered, "pulled population");

        let capacities = self.capacities_for(population, &filter, &records)?;
        let snapshot: HashMap<String, Payload> = records
            .iter()
            .map(|r| (r.id.clone(), r.payload.clone()))
            .collect();
        let request = OptimizeRequest {
            records,
            scores: None,
            capacities,
            now: Utc::now(),
        };
        let response = self.host.execute(Task::Optimize(request))?;
        let metrics = response.metrics;
        let plan = into_output(response)?.into_plan()?;

        let (applied, mut skipped) = self.apply_plan(population, &plan, &snapshot)?;
        skipped.extend(plan.skipped);

        events::optimization_completed(
            population,
            applied.len(),
            skipped.len(),
            plan.fallbacks.len(),
            started.elapsed().as_millis() as u64,
        );
        Ok(OptimizationReport {
            population: population.to_string(),
            records_considered,
            applied,
            skipped,
            fallbacks: plan.fallbacks,
            metrics,
        })
    }

    /// Register an access on a stored record.
    pub fn record_access(&self, population: &str, id: &str) -> StrataResult<()> {
        self.store.mark_accessed(population, id)
    }

    /// Move one record by hand, transforming its payload when it crosses the cold boundary.
    /// Returns `None` when the record is already in `tier`.
    pub fn relocate(
        &self,
        population: &str,
        id: &str,
        tier: Tier,
    ) -> StrataResult<Option<Transition>> {
        let record = self
            .store
            .get_all(&RecordFilter::population(population).with_ids(vec![id.to_string()]))?
            .into_iter()
            .next()
            .ok_or_else(|| StrataError::RecordNotFound { id: id.to_string() })?;
        if record.tier == tier {
            return Ok(None);
        }

        let now = Utc::now();
        let score = self.calculate_score_at(&record, now)?;
        let transition = Transition {
            record_id: record.id.clone(),
            from_tier: record.tier,
            to_tier: tier,
            reason: TransitionReason::Manual,
            score: score.total,
            timestamp: now,
        };

        let new_payload = if transition.crosses_cold_boundary() {
            self.transform_for(&record, tier)?
        } else {
            None
        };
        self.store.update_tier(population, id, tier, new_payload)?;
        events::transition_applied(population, &transition);
        Ok(Some(transition))
    }

    /// Occupancy per tier for one population.
    pub fn tier_counts(&self, population: &str) -> StrataResult<TierCounts> {
        let records = self.store.get_all(&RecordFilter::population(population))?;
        Ok(TierCounts::from_tiers(records.iter().map(|r| r.tier)))
    }

    // ── Internals ───────────────────────────────────────────────────────

    fn run(&self, task: Task) -> StrataResult<TaskOutput> {
        into_output(self.host.execute(task)?)
    }

    fn plan(
        &self,
        records: Vec<Record>,
        scores: Option<Vec<Score>>,
        capacities: TierCapacities,
        now: DateTime<Utc>,
    ) -> StrataResult<OptimizePlan> {
        let task = Task::Optimize(OptimizeRequest {
            records,
            scores,
            capacities,
            now,
        });
        Ok(self.run(task)?.into_plan()?)
    }

    /// Capacities left for the pulled records. When the filter narrows the population,
    /// records outside it keep the slots they occupy.
    fn capacities_for(
        &self,
        population: &str,
        filter: &RecordFilter,
        records: &[Record],
    ) -> StrataResult<TierCapacities> {
        let full = self.config.rebalance.capacities();
        if filter.tiers.is_none() && filter.ids.is_none() {
            return Ok(full);
        }
        let total = self.tier_counts(population)?;
        let pulled = TierCounts::from_tiers(records.iter().map(|r| r.tier));
        let outside_hot = total.hot.saturating_sub(pulled.hot);
        let outside_warm = total.warm.saturating_sub(pulled.warm);
        Ok(TierCapacities::new(
            full.hot.saturating_sub(outside_hot),
            full.warm.saturating_sub(outside_warm),
        ))
    }

    /// Re-read the records the plan touches and apply each transition whose record is
    /// still where the pass saw it. A transition that rewrites the payload also needs the
    /// payload to be unchanged since the pull.
    fn apply_plan(
        &self,
        population: &str,
        plan: &OptimizePlan,
        snapshot: &HashMap<String, Payload>,
    ) -> StrataResult<(Vec<Transition>, Vec<SkippedRecord>)> {
        let mut applied = Vec::with_capacity(plan.transitions.len());
        let mut skipped = Vec::new();
        if plan.transitions.is_empty() {
            return Ok((applied, skipped));
        }

        let ids = plan.transitions.iter().map(|t| t.record_id.clone()).collect();
        let current: HashMap<String, Record> = self
            .store
            .get_all(&RecordFilter::population(population).with_ids(ids))?
            .into_iter()
            .map(|r| (r.id.clone(), r))
            .collect();

        for transition in &plan.transitions {
            let payload = plan.payload_for(&transition.record_id).cloned();
            let reason = match current.get(&transition.record_id) {
                None => Some("record no longer exists".to_string()),
                Some(fresh) if fresh.tier != transition.from_tier => Some(format!(
                    "tier changed from {} to {} during the pass",
                    transition.from_tier, fresh.tier
                )),
                Some(fresh)
                    if payload.is_some()
                        && snapshot.get(&transition.record_id) != Some(&fresh.payload) =>
                {
                    Some("payload changed during the pass".to_string())
                }
                Some(_) => None,
            };
            if let Some(reason) = reason {
                events::transition_skipped(population, &transition.record_id, &reason);
                skipped.push(SkippedRecord::new(transition.record_id.clone(), reason));
                continue;
            }

            match self
                .store
                .update_tier(population, &transition.record_id, transition.to_tier, payload)
            {
                Ok(()) => {
                    events::transition_applied(population, transition);
                    applied.push(transition.clone());
                }
                Err(e) => {
                    let reason = format!("store update failed: {e}");
                    events::transition_skipped(population, &transition.record_id, &reason);
                    skipped.push(SkippedRecord::new(transition.record_id.clone(), reason));
                }
            }
        }

        info!(
            population,
            applied = applied.len(),
            skipped = skipped.len(),
            "optimization plan applied"
        );
        Ok((applied, skipped))
    }

    /// New payload for a record crossing the cold boundary, or `None` to keep it.
    fn transform_for(&self, record: &Record, to: Tier) -> StrataResult<Option<Payload>> {
        match (&record.payload, to) {
            (Payload::Plain(value), Tier::Cold) => Ok(Some(Payload::Cold(self.demote(value)?))),
            (Payload::Cold(cold), Tier::Hot | Tier::Warm) => {
                let outcome = self.promote(cold)?;
                match outcome.fallback {
                    Some(reason) => {
                        events::payload_fallback(Some(&record.id), &reason);
                        Ok(None)
                    }
                    None => Ok(Some(outcome.payload)),
                }
            }
            _ => Ok(None),
        }
    }
}

/// Turn a failed response into an error. The task's own failure is the error.
fn into_output(response: TaskResponse) -> StrataResult<TaskOutput> {
    Ok(response.into_output()?)
}
