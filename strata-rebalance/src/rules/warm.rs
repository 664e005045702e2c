//! Warm tier: age-decay floor first, then capacity.
//!
//! Records demoted out of hot in this pass count toward warm capacity. They are ranked
//! together with the warm records that stay; an incoming record that does not fit has its
//! transition re-targeted to cold instead of receiving a second one.

use strata_core::models::TransitionReason;
use strata_core::record::Tier;

use super::PassState;
use crate::ordering::{self, Candidate};

#[derive(Clone, Copy)]
enum Origin {
    Staying,
    Incoming,
}

/// Demote to cold every warm record below the floor (`age_decay`, even when warm has room)
/// and every record ranked past warm capacity (`optimization`).
pub fn enforce(state: &mut PassState<'_>) {
    let mut ranked: Vec<(Candidate<'_>, Origin)> = state
        .undecided_in(Tier::Warm)
        .into_iter()
        .map(|c| (c, Origin::Staying))
        .chain(state.incoming(Tier::Warm).into_iter().map(|c| (c, Origin::Incoming)))
        .collect();
    ranked.sort_by(|a, b| ordering::by_rank(&a.0, &b.0));

    // Records pinned in warm because they were skipped already hold slots.
    let pinned = state.occupancy.warm.saturating_sub(ranked.len());
    let mut kept = pinned;

    for (candidate, origin) in ranked {
        let below_floor = candidate.score < state.config.warm_floor;
        let over_capacity = kept >= state.capacities.warm;

        let reason = if below_floor {
            TransitionReason::AgeDecay
        } else if over_capacity {
            TransitionReason::Optimization
        } else {
            kept += 1;
            continue;
        };

        match origin {
            Origin::Staying => state.decide(&candidate, Tier::Cold, reason),
            Origin::Incoming => state.retarget(candidate.id, Tier::Cold, reason),
        }
    }
}
