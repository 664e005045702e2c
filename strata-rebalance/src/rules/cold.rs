//! Cold tier: promote records that earned a hotter tier. Cold records never demote further.

use strata_core::models::TransitionReason;
use strata_core::record::Tier;

use super::PassState;

/// Promote undecided cold records recommended above cold and scoring above the promotion
/// threshold, best first. A record goes to its recommended tier when a slot is free there;
/// a hot recommendation falls back to warm when hot is full. With no free slot it stays.
pub fn promote(state: &mut PassState<'_>) {
    let threshold = state.config.cold_promotion_threshold;
    let eligible: Vec<_> = state
        .undecided_in(Tier::Cold)
        .into_iter()
        .filter(|c| c.recommended != Tier::Cold && c.score > threshold)
        .collect();

    for candidate in eligible {
        let target = match candidate.recommended {
            Tier::Hot if state.free_slots(Tier::Hot) > 0 => Some(Tier::Hot),
            Tier::Hot | Tier::Warm if state.free_slots(Tier::Warm) > 0 => Some(Tier::Warm),
            _ => None,
        };
        if let Some(to) = target {
            state.decide(&candidate, to, TransitionReason::AccessPattern);
        }
    }
}
