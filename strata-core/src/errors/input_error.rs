/// Malformed input. Fails the single affected item, never a whole batch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("invalid record {id}: {reason}")]
    InvalidRecord { id: String, reason: String },

    #[error("duplicate record id in batch: {id}")]
    DuplicateRecord { id: String },

    #[error("no score supplied for record {id}")]
    MissingScore { id: String },
}
