pub mod compaction_config;
pub mod defaults;
pub mod host_config;
pub mod observability_config;
pub mod rebalance_config;
pub mod scoring_config;

pub use compaction_config::CompactionConfig;
pub use host_config::HostConfig;
pub use observability_config::ObservabilityConfig;
pub use rebalance_config::RebalanceConfig;
pub use scoring_config::{AccessMix, ScoreWeights, ScoringConfig};

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Top-level configuration, one section per subsystem.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrataConfig {
    pub scoring: ScoringConfig,
    pub rebalance: RebalanceConfig,
    pub compaction: CompactionConfig,
    pub host: HostConfig,
    pub observability: ObservabilityConfig,
}

impl StrataConfig {
    /// Parse from TOML. Missing sections and fields take their defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scoring.validate()?;
        self.compaction.validate()?;
        if self.host.workers == 0 {
            return Err(scoring_config::invalid(
                "host.workers",
                "at least one worker is required".to_string(),
            ));
        }
        if self.host.queue_capacity == 0 {
            return Err(scoring_config::invalid(
                "host.queue_capacity",
                "queue capacity must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
