use serde::{Deserialize, Serialize};
use strata_core::models::{TierCounts, Transition};
use strata_core::record::Record;

/// Tier occupancy before and after a pass, plus movement totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RebalanceSummary {
    pub before: TierCounts,
    /// Projected occupancy once every transition is applied.
    pub after: TierCounts,
    pub promotions: usize,
    pub demotions: usize,
}

impl RebalanceSummary {
    pub fn new(before: TierCounts, after: TierCounts, transitions: &[Transition]) -> Self {
        Self {
            before,
            after,
            promotions: transitions.iter().filter(|t| t.is_promotion()).count(),
            demotions: transitions.iter().filter(|t| t.is_demotion()).count(),
        }
    }
}

/// Apply transitions to an in-memory population. A transition only applies while the
/// record is still in its `from_tier`. Returns the number applied.
pub fn apply_transitions(records: &mut [Record], transitions: &[Transition]) -> usize {
    let mut applied = 0;
    for transition in transitions {
        if let Some(record) = records
            .iter_mut()
            .find(|r| r.id == transition.record_id && r.tier == transition.from_tier)
        {
            record.tier = transition.to_tier;
            applied += 1;
        }
    }
    applied
}
