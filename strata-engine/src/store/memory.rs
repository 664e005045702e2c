use std::collections::BTreeMap;

use chrono::Utc;
use dashmap::DashMap;
use strata_core::constants::DEFAULT_POPULATION;
use strata_core::errors::{StoreError, StrataResult};
use strata_core::models::TierCounts;
use strata_core::record::{Payload, Record, Tier};
use strata_core::traits::{IRecordStore, RecordFilter};

/// Thread-safe in-memory record store keyed by population, then record id.
///
/// Reads come back in id order. Intended for tests and for embedding applications that
/// keep their records in memory; nothing is persisted.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    populations: DashMap<String, BTreeMap<String, Record>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a record.
    pub fn insert(&self, population: &str, record: Record) {
        self.populations
            .entry(population.to_string())
            .or_default()
            .insert(record.id.clone(), record);
    }

    pub fn insert_many(&self, population: &str, records: impl IntoIterator<Item = Record>) {
        let mut entry = self.populations.entry(population.to_string()).or_default();
        for record in records {
            entry.insert(record.id.clone(), record);
        }
    }

    pub fn get(&self, population: &str, id: &str) -> Option<Record> {
        self.populations
            .get(population)
            .and_then(|records| records.get(id).cloned())
    }

    pub fn remove(&self, population: &str, id: &str) -> Option<Record> {
        self.populations
            .get_mut(population)
            .and_then(|mut records| records.remove(id))
    }

    pub fn len(&self, population: &str) -> usize {
        self.populations.get(population).map_or(0, |r| r.len())
    }

    pub fn is_empty(&self, population: &str) -> bool {
        self.len(population) == 0
    }

    pub fn tier_counts(&self, population: &str) -> TierCounts {
        self.populations.get(population).map_or_else(TierCounts::default, |records| {
            TierCounts::from_tiers(records.values().map(|r| r.tier))
        })
    }

    fn with_record<T>(
        &self,
        population: &str,
        id: &str,
        f: impl FnOnce(&mut Record) -> T,
    ) -> StrataResult<T> {
        let mut records = self
            .populations
            .get_mut(population)
            .ok_or_else(|| not_found(id))?;
        let record = records.get_mut(id).ok_or_else(|| not_found(id))?;
        Ok(f(record))
    }
}

fn not_found(id: &str) -> StoreError {
    StoreError::NotFound { id: id.to_string() }
}

impl IRecordStore for InMemoryRecordStore {
    fn get_all(&self, filter: &RecordFilter) -> StrataResult<Vec<Record>> {
        let population = filter.population.as_deref().unwrap_or(DEFAULT_POPULATION);
        Ok(self
            .populations
            .get(population)
            .map(|records| {
                records
                    .values()
                    .filter(|r| filter.matches(r))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn update_tier(
        &self,
        population: &str,
        id: &str,
        tier: Tier,
        new_payload: Option<Payload>,
    ) -> StrataResult<()> {
        self.with_record(population, id, |record| {
            record.tier = tier;
            if let Some(payload) = new_payload {
                record.payload = payload;
            }
        })
    }

    fn mark_accessed(&self, population: &str, id: &str) -> StrataResult<()> {
        self.with_record(population, id, |record| {
            record.access_count = record.access_count.saturating_add(1);
            record.last_accessed_at = Some(Utc::now().max(record.created_at));
        })
    }
}
