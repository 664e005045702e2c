use serde::{Deserialize, Serialize};

use crate::errors::StrataResult;
use crate::record::{Payload, TransformedPayload};

/// Result of promoting a cold payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromoteOutcome {
    /// The restored payload, or the input unchanged when the fallback was taken.
    pub payload: Payload,
    /// Why the fallback was taken. `None` when the payload was restored.
    pub fallback: Option<String>,
}

impl PromoteOutcome {
    pub fn used_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

/// Reversible payload transform applied across the warm/cold boundary.
pub trait IContentTransform: Send + Sync {
    /// Serialize and (optionally) compact a plain payload for the cold tier.
    fn demote(&self, value: &serde_json::Value) -> StrataResult<TransformedPayload>;

    /// Restore a cold payload. Never fails: corrupt input comes back verbatim with a
    /// fallback reason.
    fn promote(&self, payload: &TransformedPayload) -> PromoteOutcome;
}
