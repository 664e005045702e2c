use super::{ConfigError, HostError, InputError, StoreError, TransformError};

/// Top-level error for the tiering engine.
#[derive(Debug, thiserror::Error)]
pub enum StrataError {
    #[error("input error: {0}")]
    InputError(#[from] InputError),

    #[error("transform error: {0}")]
    TransformError(#[from] TransformError),

    #[error("host error: {0}")]
    HostError(#[from] HostError),

    #[error("store error: {0}")]
    StoreError(#[from] StoreError),

    #[error("config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("optimization already in progress for population {population}")]
    OptimizationInProgress { population: String },

    #[error("record not found: {id}")]
    RecordNotFound { id: String },
}

impl StrataError {
    /// Resource failures (timeouts, unavailable workers) the caller may retry after
    /// confirming no partial apply happened.
    pub fn is_resource_error(&self) -> bool {
        matches!(
            self,
            Self::HostError(HostError::Timeout { .. } | HostError::WorkerUnavailable { .. })
        )
    }
}

pub type StrataResult<T> = Result<T, StrataError>;
