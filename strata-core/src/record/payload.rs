use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::constants::ZSTD_MAGIC;

/// How a cold payload's bytes are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ColdEncoding {
    /// Serialized JSON, no compaction applied.
    Serialized,
    /// Serialized JSON compacted with zstd.
    Zstd,
}

/// Cold-tier representation of a payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TransformedPayload {
    /// Recorded encoding. Must agree with what the bytes look like.
    pub encoding: ColdEncoding,
    /// blake3 hex digest of the serialized (pre-compaction) form.
    pub checksum: String,
    /// Encoded bytes.
    pub bytes: Vec<u8>,
}

impl TransformedPayload {
    /// Whether the bytes start with a zstd frame header.
    pub fn looks_compacted(&self) -> bool {
        self.bytes.len() >= ZSTD_MAGIC.len() && self.bytes[..ZSTD_MAGIC.len()] == ZSTD_MAGIC
    }

    /// Encoding inferred from the bytes, independent of the recorded one.
    pub fn inferred_encoding(&self) -> ColdEncoding {
        if self.looks_compacted() {
            ColdEncoding::Zstd
        } else {
            ColdEncoding::Serialized
        }
    }

    /// Stored size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Record content. The variant records the representation, so a plain payload is never
/// decompacted and a cold payload is never re-compacted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "representation", content = "data")]
#[serde(rename_all = "snake_case")]
pub enum Payload {
    Plain(serde_json::Value),
    Cold(TransformedPayload),
}

impl Payload {
    pub fn is_plain(&self) -> bool {
        matches!(self, Self::Plain(_))
    }

    pub fn is_cold(&self) -> bool {
        matches!(self, Self::Cold(_))
    }

    /// Rough heap footprint in bytes, used for host memory metrics.
    pub fn estimated_bytes(&self) -> usize {
        match self {
            Self::Plain(value) => estimate_value_bytes(value),
            Self::Cold(t) => t.bytes.len() + t.checksum.len(),
        }
    }
}

impl Default for Payload {
    fn default() -> Self {
        Self::Plain(serde_json::Value::Null)
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        Self::Plain(value)
    }
}

/// Walks a JSON value and sums the sizes of its leaves and containers.
pub fn estimate_value_bytes(value: &serde_json::Value) -> usize {
    use serde_json::Value;
    match value {
        Value::Null | Value::Bool(_) => 1,
        Value::Number(_) => 8,
        Value::String(s) => s.len(),
        Value::Array(items) => items.iter().map(estimate_value_bytes).sum::<usize>() + 8,
        Value::Object(map) => {
            map.iter()
                .map(|(k, v)| k.len() + estimate_value_bytes(v))
                .sum::<usize>()
                + 8
        }
    }
}
