use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::record::Tier;

/// Multi-factor score of one record. Ephemeral: computed per pass, never persisted.
///
/// Every sub-score is clamped to [0, 100]; `total` is a convex combination of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Score {
    pub record_id: String,
    pub access: f64,
    pub importance: f64,
    pub age: f64,
    pub connection: f64,
    pub total: f64,
    pub recommended_tier: Tier,
}

impl Score {
    /// The four sub-scores in weight order: access, importance, age, connection.
    pub fn components(&self) -> [f64; 4] {
        [self.access, self.importance, self.age, self.connection]
    }
}
