//! Hot tier: demote the excess beyond capacity, then fill free slots with promotions.

use strata_core::models::TransitionReason;
use strata_core::record::Tier;

use super::PassState;
use crate::ordering;

/// Keep the top `capacity` hot records. Each excess record goes warm when its score is at
/// least the hot-demotion floor (`optimization`), cold otherwise (`age_decay`).
pub fn demote_excess(state: &mut PassState<'_>) {
    let hot = state.undecided_in(Tier::Hot);
    let excess = state.occupancy.hot.saturating_sub(state.capacities.hot);
    if excess == 0 {
        return;
    }
    // Lowest ranked records go first; `hot` is in rank order.
    let first_excess = hot.len().saturating_sub(excess);
    for candidate in &hot[first_excess..] {
        if candidate.score >= state.config.hot_demotion_warm_floor {
            state.decide(candidate, Tier::Warm, TransitionReason::Optimization);
        } else {
            state.decide(candidate, Tier::Cold, TransitionReason::AgeDecay);
        }
    }
}

/// Promote non-hot records recommended for hot, best first, into the free hot slots.
pub fn promote_into_free_slots(state: &mut PassState<'_>) {
    let slots = state.free_slots(Tier::Hot);
    if slots == 0 {
        return;
    }
    let mut wanting: Vec<_> = state
        .candidates
        .iter()
        .filter(|c| c.tier != Tier::Hot && c.recommended == Tier::Hot && !state.is_decided(c.id))
        .copied()
        .collect();
    ordering::sort_by_rank(&mut wanting);

    for candidate in wanting.iter().take(slots) {
        state.decide(candidate, Tier::Hot, TransitionReason::AccessPattern);
    }
}
