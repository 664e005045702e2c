//! # strata-rebalance
//!
//! One rebalancing pass over a record population.
//! Rules run in order (hot, warm, cold) and a record gets at most one transition per pass.
//! Candidates are ranked by score descending, then record id ascending, so identical
//! input always yields the identical transition set.

pub mod engine;
pub mod ordering;
pub mod rules;
pub mod summary;

pub use engine::{RebalancePlan, Rebalancer};
pub use summary::{apply_transitions, RebalanceSummary};
