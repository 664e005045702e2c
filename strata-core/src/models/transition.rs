use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::record::Tier;

/// Why a record changes tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TransitionReason {
    /// Capacity pressure.
    Optimization,
    /// Score fell below the tier's floor.
    AgeDecay,
    /// Score earned a hotter tier.
    AccessPattern,
    /// Explicit operator relocation.
    Manual,
}

impl TransitionReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Optimization => "optimization",
            Self::AgeDecay => "age_decay",
            Self::AccessPattern => "access_pattern",
            Self::Manual => "manual",
        }
    }
}

impl fmt::Display for TransitionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A proposed, not yet applied, move of one record between tiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Transition {
    pub record_id: String,
    pub from_tier: Tier,
    pub to_tier: Tier,
    pub reason: TransitionReason,
    /// Total score at decision time.
    pub score: f64,
    pub timestamp: DateTime<Utc>,
}

impl Transition {
    /// Whether applying this transition changes the payload representation.
    pub fn crosses_cold_boundary(&self) -> bool {
        self.from_tier.crosses_cold_boundary(self.to_tier)
    }

    pub fn is_promotion(&self) -> bool {
        self.to_tier > self.from_tier
    }

    pub fn is_demotion(&self) -> bool {
        self.to_tier < self.from_tier
    }
}
