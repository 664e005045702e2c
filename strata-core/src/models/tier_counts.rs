use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::record::Tier;

/// Number of records per tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TierCounts {
    pub hot: usize,
    pub warm: usize,
    pub cold: usize,
}

impl TierCounts {
    /// Count tiers from any iterator of placements.
    pub fn from_tiers(tiers: impl IntoIterator<Item = Tier>) -> Self {
        let mut counts = Self::default();
        for tier in tiers {
            counts.increment(tier);
        }
        counts
    }

    pub fn get(&self, tier: Tier) -> usize {
        match tier {
            Tier::Hot => self.hot,
            Tier::Warm => self.warm,
            Tier::Cold => self.cold,
        }
    }

    pub fn increment(&mut self, tier: Tier) {
        match tier {
            Tier::Hot => self.hot += 1,
            Tier::Warm => self.warm += 1,
            Tier::Cold => self.cold += 1,
        }
    }

    pub fn decrement(&mut self, tier: Tier) {
        match tier {
            Tier::Hot => self.hot = self.hot.saturating_sub(1),
            Tier::Warm => self.warm = self.warm.saturating_sub(1),
            Tier::Cold => self.cold = self.cold.saturating_sub(1),
        }
    }

    pub fn total(&self) -> usize {
        self.hot + self.warm + self.cold
    }
}
