//! # strata-engine
//!
//! The façade callers talk to. It owns an explicit record store handle and an execution
//! host, dispatches scoring and optimization work to the host, and is the only writer of
//! `tier` and `payload` back to the store. Optimization passes are serialized per
//! population; every planned transition is re-validated against a fresh read before it
//! is applied.

pub mod engine;
pub mod locks;
pub mod report;
pub mod store;

pub use engine::TierEngine;
pub use locks::{PopulationGuard, PopulationLocks};
pub use report::OptimizationReport;
pub use store::InMemoryRecordStore;
