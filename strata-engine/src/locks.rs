//! Per-population single-execution guard for optimization passes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use strata_core::errors::{StrataError, StrataResult};

/// One running flag per population. Acquisition never blocks: a second pass over a
/// population that is already being optimized fails fast.
#[derive(Debug, Default)]
pub struct PopulationLocks {
    running: DashMap<String, Arc<AtomicBool>>,
}

impl PopulationLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_acquire(&self, population: &str) -> StrataResult<PopulationGuard> {
        let flag = Arc::clone(
            self.running
                .entry(population.to_string())
                .or_insert_with(|| Arc::new(AtomicBool::new(false)))
                .value(),
        );
        if flag
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(StrataError::OptimizationInProgress {
                population: population.to_string(),
            });
        }
        Ok(PopulationGuard { flag })
    }

    pub fn is_locked(&self, population: &str) -> bool {
        self.running
            .get(population)
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }
}

/// Releases the population when dropped.
#[derive(Debug)]
pub struct PopulationGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for PopulationGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
