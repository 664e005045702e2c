use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::TierCapacities;

/// Tier rebalancing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RebalanceConfig {
    /// Maximum records in hot.
    pub hot_capacity: usize,
    /// Maximum records in warm.
    pub warm_capacity: usize,
    /// Hot excess scoring at or above this goes warm; below it goes cold.
    pub hot_demotion_warm_floor: f64,
    /// Warm records scoring below this go cold regardless of occupancy.
    pub warm_floor: f64,
    /// Cold records must score above this to be promoted.
    pub cold_promotion_threshold: f64,
}

impl RebalanceConfig {
    pub fn capacities(&self) -> TierCapacities {
        TierCapacities::new(self.hot_capacity, self.warm_capacity)
    }
}

impl Default for RebalanceConfig {
    fn default() -> Self {
        Self {
            hot_capacity: defaults::DEFAULT_HOT_CAPACITY,
            warm_capacity: defaults::DEFAULT_WARM_CAPACITY,
            hot_demotion_warm_floor: defaults::DEFAULT_HOT_DEMOTION_WARM_FLOOR,
            warm_floor: defaults::DEFAULT_WARM_FLOOR,
            cold_promotion_threshold: defaults::DEFAULT_COLD_PROMOTION_THRESHOLD,
        }
    }
}
