use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Per-tier capacity caps. Cold has no cap: it is the overflow sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TierCapacities {
    pub hot: usize,
    pub warm: usize,
}

impl TierCapacities {
    pub fn new(hot: usize, warm: usize) -> Self {
        Self { hot, warm }
    }
}
