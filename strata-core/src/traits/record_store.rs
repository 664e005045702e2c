use serde::{Deserialize, Serialize};

use crate::errors::StrataResult;
use crate::record::{Payload, Record, Tier};

/// Selection of records pulled from the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFilter {
    /// Population (persona, collection) to read from. `None` reads the default population.
    pub population: Option<String>,
    /// Restrict to these tiers.
    pub tiers: Option<Vec<Tier>>,
    /// Restrict to these ids.
    pub ids: Option<Vec<String>>,
}

impl RecordFilter {
    pub fn population(name: impl Into<String>) -> Self {
        Self {
            population: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_tiers(mut self, tiers: Vec<Tier>) -> Self {
        self.tiers = Some(tiers);
        self
    }

    pub fn with_ids(mut self, ids: Vec<String>) -> Self {
        self.ids = Some(ids);
        self
    }

    /// Whether a record passes the tier and id restrictions.
    pub fn matches(&self, record: &Record) -> bool {
        let tier_ok = self
            .tiers
            .as_ref()
            .map_or(true, |tiers| tiers.contains(&record.tier));
        let id_ok = self
            .ids
            .as_ref()
            .map_or(true, |ids| ids.iter().any(|id| id == &record.id));
        tier_ok && id_ok
    }
}

/// The external record store. The engine never defines its schema; it only needs these
/// operations. Implementations must be safe to share across threads.
pub trait IRecordStore: Send + Sync {
    /// Read every record matching the filter.
    fn get_all(&self, filter: &RecordFilter) -> StrataResult<Vec<Record>>;

    /// Set a record's tier, replacing its payload when one is given.
    fn update_tier(
        &self,
        population: &str,
        id: &str,
        tier: Tier,
        new_payload: Option<Payload>,
    ) -> StrataResult<()>;

    /// Register an access: bump the access count and last-access time.
    fn mark_accessed(&self, population: &str, id: &str) -> StrataResult<()>;
}
