//! CompactionEngine: implements IContentTransform.

use strata_core::config::CompactionConfig;
use strata_core::errors::{StrataResult, TransformError};
use strata_core::record::{ColdEncoding, Payload, TransformedPayload};
use strata_core::traits::{IContentTransform, PromoteOutcome};
use strata_observability::compaction_span;
use strata_observability::tracing_setup::events;
use tracing::debug;

use crate::checksum;
use crate::codec;
use crate::stats::CompactionStats;

/// Reversible warm/cold payload transform.
#[derive(Debug, Clone, Default)]
pub struct CompactionEngine {
    config: CompactionConfig,
}

impl CompactionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CompactionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompactionConfig {
        &self.config
    }

    /// Demote and report how much space the cold form takes.
    ///
    /// The serialized form is compacted only when compaction is enabled, the form is at
    /// least `min_bytes` long, and the zstd frame comes out smaller. Otherwise the payload
    /// is stored serialized, still marked as a cold representation.
    pub fn demote_with_stats(
        &self,
        value: &serde_json::Value,
    ) -> Result<(TransformedPayload, CompactionStats), TransformError> {
        let _span = compaction_span!("demote").entered();
        let serialized = codec::serialize(value)?;
        let checksum = checksum::digest(&serialized);
        let original_bytes = serialized.len();

        let (encoding, bytes) = if self.config.enabled && original_bytes >= self.config.min_bytes {
            let compacted = codec::compact(&serialized, self.config.level)?;
            if compacted.len() < original_bytes {
                (ColdEncoding::Zstd, compacted)
            } else {
                (ColdEncoding::Serialized, serialized)
            }
        } else {
            (ColdEncoding::Serialized, serialized)
        };

        let stats = CompactionStats {
            original_bytes,
            stored_bytes: bytes.len(),
            encoding,
        };
        debug!(
            original_bytes,
            stored_bytes = stats.stored_bytes,
            encoding = ?encoding,
            "payload demoted"
        );
        Ok((
            TransformedPayload {
                encoding,
                checksum,
                bytes,
            },
            stats,
        ))
    }

    /// Strict inverse of demotion. Errors instead of falling back.
    ///
    /// The recorded encoding must agree with the bytes: a zstd-marked payload without a
    /// zstd frame header, or a serialized one that carries one, is rejected.
    pub fn restore(&self, payload: &TransformedPayload) -> Result<serde_json::Value, TransformError> {
        let _span = compaction_span!("promote").entered();
        let inferred = payload.inferred_encoding();
        if inferred != payload.encoding {
            return Err(TransformError::DecompactionFailed {
                reason: format!(
                    "recorded encoding {:?} does not match bytes ({:?})",
                    payload.encoding, inferred
                ),
            });
        }

        let serialized = match payload.encoding {
            ColdEncoding::Zstd => codec::expand(&payload.bytes)?,
            ColdEncoding::Serialized => payload.bytes.clone(),
        };
        checksum::verify(&serialized, &payload.checksum).map_err(|actual| {
            TransformError::ChecksumMismatch {
                expected: payload.checksum.clone(),
                actual,
            }
        })?;
        codec::deserialize(&serialized)
    }

    /// Demote a record payload. A payload already in cold form is returned unchanged.
    pub fn demote_payload(&self, payload: &Payload) -> StrataResult<Payload> {
        match payload {
            Payload::Plain(value) => Ok(Payload::Cold(self.demote(value)?)),
            Payload::Cold(_) => Ok(payload.clone()),
        }
    }

    /// Promote a record payload. A plain payload is returned unchanged with no fallback.
    pub fn promote_payload(&self, payload: &Payload) -> PromoteOutcome {
        match payload {
            Payload::Plain(_) => PromoteOutcome {
                payload: payload.clone(),
                fallback: None,
            },
            Payload::Cold(transformed) => self.promote(transformed),
        }
    }
}

impl IContentTransform for CompactionEngine {
    fn demote(&self, value: &serde_json::Value) -> StrataResult<TransformedPayload> {
        Ok(self.demote_with_stats(value).map(|(payload, _)| payload)?)
    }

    fn promote(&self, payload: &TransformedPayload) -> PromoteOutcome {
        match self.restore(payload) {
            Ok(value) => PromoteOutcome {
                payload: Payload::Plain(value),
                fallback: None,
            },
            Err(e) => {
                let reason = e.to_string();
                events::payload_fallback(None, &reason);
                PromoteOutcome {
                    payload: Payload::Cold(payload.clone()),
                    fallback: Some(reason),
                }
            }
        }
    }
}
