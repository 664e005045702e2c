//! Rebalancer: validates the population, then runs the tier rules in order.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strata_core::config::RebalanceConfig;
use strata_core::errors::InputError;
use strata_core::models::{Score, SkippedRecord, TierCapacities, TierCounts, Transition};
use strata_core::record::Record;
use tracing::{debug, info};

use crate::ordering::Candidate;
use crate::rules::{self, PassState};
use crate::summary::RebalanceSummary;

/// Output of one rebalancing pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RebalancePlan {
    /// At most one transition per record, in rule order.
    pub transitions: Vec<Transition>,
    /// Records left where they are because they could not be evaluated.
    pub skipped: Vec<SkippedRecord>,
    pub summary: RebalanceSummary,
}

impl RebalancePlan {
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

/// Computes the transitions that bring a population within tier capacities and thresholds.
#[derive(Debug, Clone, Default)]
pub struct Rebalancer {
    config: RebalanceConfig,
}

impl Rebalancer {
    /// Create a Rebalancer with the default floors and thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RebalanceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RebalanceConfig {
        &self.config
    }

    /// Run one pass. Scores are matched to records by id; a record without a score, with
    /// an invalid shape, or repeating an earlier id is skipped and keeps its tier.
    pub fn rebalance(
        &self,
        records: &[Record],
        scores: &[Score],
        capacities: TierCapacities,
        now: DateTime<Utc>,
    ) -> RebalancePlan {
        let mut by_id: HashMap<&str, &Score> = HashMap::with_capacity(scores.len());
        for score in scores {
            by_id.entry(score.record_id.as_str()).or_insert(score);
        }

        let mut seen: HashSet<&str> = HashSet::with_capacity(records.len());
        let mut candidates = Vec::with_capacity(records.len());
        let mut skipped = Vec::new();
        let mut occupancy = TierCounts::default();

        for record in records {
            if !seen.insert(record.id.as_str()) {
                skipped.push(skip(InputError::DuplicateRecord {
                    id: record.id.clone(),
                }));
                continue;
            }
            occupancy.increment(record.tier);

            if let Err(e) = record.validate() {
                skipped.push(skip(e));
                continue;
            }
            let Some(score) = by_id.get(record.id.as_str()) else {
                skipped.push(skip(InputError::MissingScore {
                    id: record.id.clone(),
                }));
                continue;
            };
            if !score.total.is_finite() {
                skipped.push(SkippedRecord::new(
                    record.id.clone(),
                    format!("score {} is not finite", score.total),
                ));
                continue;
            }
            candidates.push(Candidate {
                id: record.id.as_str(),
                tier: record.tier,
                score: score.total,
                recommended: score.recommended_tier,
            });
        }

        let before = occupancy;
        let mut state = PassState::new(candidates, occupancy, capacities, &self.config, now);

        rules::hot::demote_excess(&mut state);
        rules::hot::promote_into_free_slots(&mut state);
        debug!(transitions = state.transitions.len(), "hot rules applied");
        rules::warm::enforce(&mut state);
        debug!(transitions = state.transitions.len(), "warm rules applied");
        rules::cold::promote(&mut state);

        let summary = RebalanceSummary::new(before, state.occupancy, &state.transitions);
        info!(
            records = records.len(),
            transitions = state.transitions.len(),
            skipped = skipped.len(),
            promotions = summary.promotions,
            demotions = summary.demotions,
            "rebalance pass complete"
        );

        RebalancePlan {
            transitions: state.transitions,
            skipped,
            summary,
        }
    }
}

fn skip(error: InputError) -> SkippedRecord {
    let id = match &error {
        InputError::InvalidRecord { id, .. }
        | InputError::DuplicateRecord { id }
        | InputError::MissingScore { id } => id.clone(),
    };
    SkippedRecord::new(id, error.to_string())
}
