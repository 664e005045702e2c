//! # strata-scoring
//!
//! Four-factor record scoring.
//! Factors: access (recency + frequency), importance, age, connection.
//! The weighted total maps to a recommended tier through two thresholds.

pub mod batch;
pub mod engine;
pub mod factors;
pub mod formula;
pub mod thresholds;

pub use engine::ScoringEngine;
pub use factors::ScoringContext;
pub use formula::ScoreBreakdown;
