//! Per-tier rules. Each rule reads and extends the shared [`PassState`].

pub mod cold;
pub mod hot;
pub mod warm;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use strata_core::config::RebalanceConfig;
use strata_core::models::{TierCapacities, TierCounts, Transition, TransitionReason};
use strata_core::record::Tier;

use crate::ordering::Candidate;

/// Mutable state threaded through the rules of one pass.
pub struct PassState<'a> {
    pub candidates: Vec<Candidate<'a>>,
    pub capacities: TierCapacities,
    pub config: &'a RebalanceConfig,
    pub now: DateTime<Utc>,
    /// Projected occupancy, including records that were skipped and will not move.
    pub occupancy: TierCounts,
    pub transitions: Vec<Transition>,
    /// Record id → index into `transitions`.
    decided: HashMap<&'a str, usize>,
}

impl<'a> PassState<'a> {
    pub fn new(
        candidates: Vec<Candidate<'a>>,
        occupancy: TierCounts,
        capacities: TierCapacities,
        config: &'a RebalanceConfig,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            candidates,
            capacities,
            config,
            now,
            occupancy,
            transitions: Vec::new(),
            decided: HashMap::new(),
        }
    }

    pub fn is_decided(&self, id: &str) -> bool {
        self.decided.contains_key(id)
    }

    /// Undecided candidates currently in `tier`, in rank order.
    pub fn undecided_in(&self, tier: Tier) -> Vec<Candidate<'a>> {
        let mut out: Vec<Candidate<'a>> = self
            .candidates
            .iter()
            .filter(|c| c.tier == tier && !self.is_decided(c.id))
            .copied()
            .collect();
        crate::ordering::sort_by_rank(&mut out);
        out
    }

    /// Free slots left in a capped tier. Cold is unbounded.
    pub fn free_slots(&self, tier: Tier) -> usize {
        match tier {
            Tier::Hot => self.capacities.hot.saturating_sub(self.occupancy.hot),
            Tier::Warm => self.capacities.warm.saturating_sub(self.occupancy.warm),
            Tier::Cold => usize::MAX,
        }
    }

    /// Record a transition and move the candidate in the projected occupancy.
    pub fn decide(&mut self, candidate: &Candidate<'a>, to: Tier, reason: TransitionReason) {
        debug_assert!(!self.is_decided(candidate.id));
        self.occupancy.decrement(candidate.tier);
        self.occupancy.increment(to);
        self.decided.insert(candidate.id, self.transitions.len());
        self.transitions.push(Transition {
            record_id: candidate.id.to_string(),
            from_tier: candidate.tier,
            to_tier: to,
            reason,
            score: candidate.score,
            timestamp: self.now,
        });
    }

    /// Re-target an already decided transition. The record still moves exactly once.
    pub fn retarget(&mut self, id: &str, to: Tier, reason: TransitionReason) {
        if let Some(&index) = self.decided.get(id) {
            let transition = &mut self.transitions[index];
            self.occupancy.decrement(transition.to_tier);
            self.occupancy.increment(to);
            transition.to_tier = to;
            transition.reason = reason;
        }
    }

    /// Ids of records whose transition so far lands in `tier`, with their candidates.
    pub fn incoming(&self, tier: Tier) -> Vec<Candidate<'a>> {
        self.candidates
            .iter()
            .filter(|c| {
                self.decided
                    .get(c.id)
                    .is_some_and(|&i| self.transitions[i].to_tier == tier)
            })
            .copied()
            .collect()
    }
}
