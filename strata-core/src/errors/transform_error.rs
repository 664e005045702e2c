/// Content transform errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    #[error("compaction failed: {reason}")]
    CompactionFailed { reason: String },

    #[error("decompaction failed: {reason}")]
    DecompactionFailed { reason: String },

    #[error("serialization failed: {reason}")]
    Serialization { reason: String },

    #[error("checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },
}
