//! Byte-level steps of the transform. Each returns a `TransformError` on failure.

use strata_core::constants::MAX_PAYLOAD_DEPTH;
use strata_core::errors::TransformError;

pub use strata_core::record::ColdEncoding;

/// Serialize a logical payload to JSON bytes.
///
/// Payloads nested deeper than [`MAX_PAYLOAD_DEPTH`] are rejected: the parser could not
/// read them back, so they would be stuck in cold form.
pub fn serialize(value: &serde_json::Value) -> Result<Vec<u8>, TransformError> {
    let depth = nesting_depth(value);
    if depth > MAX_PAYLOAD_DEPTH {
        return Err(TransformError::Serialization {
            reason: format!("payload nesting depth {depth} exceeds {MAX_PAYLOAD_DEPTH}"),
        });
    }
    serde_json::to_vec(value).map_err(|e| TransformError::Serialization {
        reason: e.to_string(),
    })
}

/// Parse JSON bytes back into a logical payload.
pub fn deserialize(bytes: &[u8]) -> Result<serde_json::Value, TransformError> {
    serde_json::from_slice(bytes).map_err(|e| TransformError::Serialization {
        reason: e.to_string(),
    })
}

/// Compact bytes into a zstd frame at `level` (1-22).
pub fn compact(bytes: &[u8], level: i32) -> Result<Vec<u8>, TransformError> {
    zstd::encode_all(bytes, level).map_err(|e| TransformError::CompactionFailed {
        reason: e.to_string(),
    })
}

/// Expand a zstd frame.
pub fn expand(bytes: &[u8]) -> Result<Vec<u8>, TransformError> {
    zstd::decode_all(bytes).map_err(|e| TransformError::DecompactionFailed {
        reason: e.to_string(),
    })
}

/// Array/object nesting depth of a value. Scalars are depth 0.
pub fn nesting_depth(value: &serde_json::Value) -> usize {
    use serde_json::Value;
    let mut deepest = 0;
    let mut pending = vec![(value, 0usize)];
    while let Some((value, depth)) = pending.pop() {
        match value {
            Value::Array(items) => pending.extend(items.iter().map(|child| (child, depth + 1))),
            Value::Object(map) => pending.extend(map.values().map(|child| (child, depth + 1))),
            _ => continue,
        }
        deepest = deepest.max(depth + 1);
    }
    deepest
}
