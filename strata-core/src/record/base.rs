use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::payload::Payload;
use super::tier::Tier;
use crate::constants::MAX_IMPORTANCE;
use crate::errors::InputError;

/// A content item owned by the external record store.
///
/// The engine only reads these fields and writes back `tier` and `payload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Record {
    /// Stable unique identifier.
    pub id: String,
    pub created_at: DateTime<Utc>,
    /// `None` means never accessed since creation.
    pub last_accessed_at: Option<DateTime<Utc>>,
    /// 0–100. `None` falls back to the configured default importance.
    pub importance: Option<u8>,
    pub access_count: u64,
    /// Number of semantic links to other records.
    pub connection_count: u64,
    /// Authoritative current placement.
    pub tier: Tier,
    pub payload: Payload,
}

impl Record {
    /// Timestamp of the last touch: last access, or creation when never accessed.
    pub fn last_touched_at(&self) -> DateTime<Utc> {
        self.last_accessed_at.unwrap_or(self.created_at)
    }

    /// Check the fields the scorer relies on.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.id.trim().is_empty() {
            return Err(InputError::InvalidRecord {
                id: self.id.clone(),
                reason: "record id is empty".to_string(),
            });
        }
        if let Some(importance) = self.importance {
            if importance > MAX_IMPORTANCE {
                return Err(InputError::InvalidRecord {
                    id: self.id.clone(),
                    reason: format!("importance {importance} exceeds {MAX_IMPORTANCE}"),
                });
            }
        }
        if let Some(accessed) = self.last_accessed_at {
            if accessed < self.created_at {
                return Err(InputError::InvalidRecord {
                    id: self.id.clone(),
                    reason: format!(
                        "last access {} precedes creation {}",
                        accessed.to_rfc3339(),
                        self.created_at.to_rfc3339()
                    ),
                });
            }
        }
        Ok(())
    }

    /// Rough heap footprint in bytes, used for host memory metrics.
    pub fn estimated_bytes(&self) -> usize {
        std::mem::size_of::<Self>() + self.id.len() + self.payload.estimated_bytes()
    }
}
