use serde::{Deserialize, Serialize};

use super::defaults;
use super::scoring_config::invalid;
use crate::errors::ConfigError;

/// Cold-tier compaction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompactionConfig {
    /// When false, cold payloads are serialized but not compacted.
    pub enabled: bool,
    /// zstd level, 1 (fast) through 22 (smallest).
    pub level: i32,
    /// Serialized payloads smaller than this are not worth compacting.
    pub min_bytes: usize,
}

impl CompactionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let range = defaults::MIN_COMPACTION_LEVEL..=defaults::MAX_COMPACTION_LEVEL;
        if !range.contains(&self.level) {
            return Err(invalid(
                "compaction.level",
                format!("{} is outside {:?}", self.level, range),
            ));
        }
        Ok(())
    }
}

impl Default for CompactionConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::DEFAULT_COMPACTION_ENABLED,
            level: defaults::DEFAULT_COMPACTION_LEVEL,
            min_bytes: defaults::DEFAULT_COMPACTION_MIN_BYTES,
        }
    }
}
