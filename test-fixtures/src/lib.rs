//! Record builders, populations, and proptest strategies shared by tests across the workspace.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use serde_json::json;
use strata_core::models::Score;
use strata_core::record::{Payload, Record, Tier};

/// Fixed reference time so every test is reproducible.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
}

/// Fluent builder for records. Defaults: created and accessed at `fixed_now()`,
/// importance 50, no accesses, no links, warm tier, small JSON payload.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        let now = fixed_now();
        let id = id.into();
        Self {
            record: Record {
                payload: Payload::Plain(json!({ "id": id, "text": "fixture content" })),
                id,
                created_at: now,
                last_accessed_at: Some(now),
                importance: Some(50),
                access_count: 0,
                connection_count: 0,
                tier: Tier::Warm,
            },
        }
    }

    /// Builder with a random UUID v4 id.
    pub fn random() -> Self {
        Self::new(uuid::Uuid::new_v4().to_string())
    }

    pub fn tier(mut self, tier: Tier) -> Self {
        self.record.tier = tier;
        self
    }

    pub fn importance(mut self, importance: u8) -> Self {
        self.record.importance = Some(importance);
        self
    }

    pub fn no_importance(mut self) -> Self {
        self.record.importance = None;
        self
    }

    pub fn access_count(mut self, count: u64) -> Self {
        self.record.access_count = count;
        self
    }

    pub fn connections(mut self, count: u64) -> Self {
        self.record.connection_count = count;
        self
    }

    /// Created `days` before `fixed_now()`. Last access moves along unless set later.
    pub fn created_days_ago(mut self, days: i64) -> Self {
        self.record.created_at = fixed_now() - Duration::days(days);
        if let Some(accessed) = self.record.last_accessed_at {
            if accessed < self.record.created_at {
                self.record.last_accessed_at = Some(self.record.created_at);
            }
        }
        self
    }

    /// Last accessed `days` before `fixed_now()`.
    pub fn accessed_days_ago(mut self, days: i64) -> Self {
        let accessed = fixed_now() - Duration::days(days);
        if accessed < self.record.created_at {
            self.record.created_at = accessed;
        }
        self.record.last_accessed_at = Some(accessed);
        self
    }

    pub fn never_accessed(mut self) -> Self {
        self.record.last_accessed_at = None;
        self
    }

    pub fn payload(mut self, payload: Payload) -> Self {
        self.record.payload = payload;
        self
    }

    pub fn build(self) -> Record {
        self.record
    }
}

/// A record placed in `tier` whose other fields are defaults.
pub fn make_record(id: &str, tier: Tier) -> Record {
    RecordBuilder::new(id).tier(tier).build()
}

/// A hand-made score for rebalancer tests, recommending the tier the default
/// thresholds (75 / 40) would pick.
pub fn make_score(record_id: &str, total: f64) -> Score {
    let recommended_tier = if total >= 75.0 {
        Tier::Hot
    } else if total >= 40.0 {
        Tier::Warm
    } else {
        Tier::Cold
    };
    Score {
        record_id: record_id.to_string(),
        access: total,
        importance: total,
        age: total,
        connection: total,
        total,
        recommended_tier,
    }
}

/// Records and matching scores from `(id, tier, total)` triples.
pub fn make_population(entries: &[(&str, Tier, f64)]) -> (Vec<Record>, Vec<Score>) {
    entries.iter()
        .map(|(id, tier, total)| (make_record(id, *tier), make_score(id, *total)))
        .unzip()
}

// ── proptest strategies ─────────────────────────────────────────────────

pub fn arb_tier() -> impl Strategy<Value = Tier> {
    prop_oneof![Just(Tier::Hot), Just(Tier::Warm), Just(Tier::Cold)]
}

/// Any well-formed record relative to `fixed_now()`.
pub fn arb_record() -> impl Strategy<Value = Record> {
    (
        "[a-z0-9]{1,12}",
        arb_tier(),
        proptest::option::of(0u8..=100),
        0u64..10_000,
        0u64..500,
        0i64..2_000,
        proptest::option::of(0i64..2_000),
    )
        .prop_map(
            |(id, tier, importance, access_count, connection_count, created, accessed)| {
                let mut builder = RecordBuilder::new(id)
                    .tier(tier)
                    .access_count(access_count)
                    .connections(connection_count)
                    .created_days_ago(created);
                builder = match importance {
                    Some(i) => builder.importance(i),
                    None => builder.no_importance(),
                };
                builder = match accessed {
                    // Access never precedes creation.
                    Some(days) => builder.accessed_days_ago(days.min(created)),
                    None => builder.never_accessed(),
                };
                builder.build()
            },
        )
}

/// A population with unique ids `r0..rN`.
pub fn arb_population(max: usize) -> impl Strategy<Value = Vec<Record>> {
    proptest::collection::vec(arb_record(), 0..max).prop_map(|records| {
        records
            .into_iter()
            .enumerate()
            .map(|(i, mut r)| {
                r.id = format!("r{i:04}");
                r
            })
            .collect()
    })
}

/// Arbitrary JSON payload values, nested a few levels deep.
pub fn arb_json() -> impl Strategy<Value = serde_json::Value> {
    let leaf = prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::from),
        any::<i64>().prop_map(serde_json::Value::from),
        any::<f64>()
            .prop_filter("JSON numbers are finite", |f| f.is_finite())
            .prop_map(serde_json::Value::from),
        ".{0,40}".prop_map(serde_json::Value::from),
    ];
    leaf.prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..6).prop_map(serde_json::Value::Array),
            proptest::collection::btree_map("[a-z]{1,8}", inner, 0..6).prop_map(|m| {
                serde_json::Value::Object(m.into_iter().collect())
            }),
        ]
    })
}
