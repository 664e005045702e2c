/// Errors surfaced by a record store implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("record {id} not found in store")]
    NotFound { id: String },

    #[error("store backend failure: {reason}")]
    Backend { reason: String },
}
