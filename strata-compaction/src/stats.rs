use serde::{Deserialize, Serialize};
use strata_core::record::ColdEncoding;

/// Size accounting for a single demotion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompactionStats {
    /// Size of the serialized form.
    pub original_bytes: usize,
    /// Size actually stored in the cold tier.
    pub stored_bytes: usize,
    pub encoding: ColdEncoding,
}

impl CompactionStats {
    /// original / stored. 1.0 when nothing was stored.
    pub fn ratio(&self) -> f64 {
        if self.stored_bytes == 0 {
            1.0
        } else {
            self.original_bytes as f64 / self.stored_bytes as f64
        }
    }

    /// Percentage of the serialized size saved by compaction.
    pub fn savings_percent(&self) -> f64 {
        if self.original_bytes == 0 {
            0.0
        } else {
            (1.0 - self.stored_bytes as f64 / self.original_bytes as f64) * 100.0
        }
    }
}
