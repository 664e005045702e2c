//! Ranking and tie-break.

use std::cmp::Ordering;

use strata_core::record::Tier;

/// A scored record taking part in a pass.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub id: &'a str,
    pub tier: Tier,
    pub score: f64,
    pub recommended: Tier,
}

/// Score descending, then record id ascending.
pub fn by_rank(a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
    b.score.total_cmp(&a.score).then_with(|| a.id.cmp(b.id))
}

/// Stable sort into rank order.
pub fn sort_by_rank(candidates: &mut [Candidate<'_>]) {
    candidates.sort_by(by_rank);
}
