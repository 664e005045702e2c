use strata_core::errors::{StoreError, StrataError};
use strata_core::record::{Payload, Tier};
use strata_core::traits::{IRecordStore, RecordFilter};
use strata_engine::InMemoryRecordStore;
use test_fixtures::{make_record, RecordBuilder};

fn seeded() -> InMemoryRecordStore {
    let store = InMemoryRecordStore::new();
    store.insert_many(
        "p",
        [
            make_record("c", Tier::Cold),
            make_record("a", Tier::Hot),
            make_record("b", Tier::Warm),
        ],
    );
    store
}

#[test]
fn reads_come_back_in_id_order() {
    let records = seeded().get_all(&RecordFilter::population("p")).unwrap();
    let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["a", "b", "c"]);
}

#[test]
fn filters_by_tier_and_id() {
    let store = seeded();
    let warm_or_cold = store
        .get_all(&RecordFilter::population("p").with_tiers(vec![Tier::Warm, Tier::Cold]))
        .unwrap();
    assert_eq!(warm_or_cold.len(), 2);

    let only_a = store
        .get_all(&RecordFilter::population("p").with_ids(vec!["a".into(), "zz".into()]))
        .unwrap();
    assert_eq!(only_a.len(), 1);
    assert_eq!(only_a[0].id, "a");
}

#[test]
fn populations_are_isolated() {
    let store = seeded();
    store.insert("q", make_record("a", Tier::Cold));
    assert_eq!(store.len("p"), 3);
    assert_eq!(store.len("q"), 1);
    assert!(store.get_all(&RecordFilter::population("none")).unwrap().is_empty());
    // No population in the filter reads the default population.
    assert!(store.get_all(&RecordFilter::default()).unwrap().is_empty());
}

#[test]
fn update_tier_replaces_payload_only_when_given() {
    let store = seeded();
    let before = store.get("p", "a").unwrap().payload;

    store.update_tier("p", "a", Tier::Warm, None).unwrap();
    let record = store.get("p", "a").unwrap();
    assert_eq!(record.tier, Tier::Warm);
    assert_eq!(record.payload, before);

    let replacement = Payload::Plain(serde_json::json!("replaced"));
    store
        .update_tier("p", "a", Tier::Hot, Some(replacement.clone()))
        .unwrap();
    assert_eq!(store.get("p", "a").unwrap().payload, replacement);
}

#[test]
fn missing_records_are_not_found() {
    let store = seeded();
    for result in [
        store.update_tier("p", "zz", Tier::Hot, None),
        store.update_tier("nowhere", "a", Tier::Hot, None),
        store.mark_accessed("p", "zz"),
    ] {
        assert!(matches!(
            result,
            Err(StrataError::StoreError(StoreError::NotFound { .. }))
        ));
    }
}

#[test]
fn mark_accessed_never_precedes_creation() {
    let store = InMemoryRecordStore::new();
    let record = RecordBuilder::new("never").never_accessed().access_count(3).build();
    store.insert("p", record);

    store.mark_accessed("p", "never").unwrap();
    let record = store.get("p", "never").unwrap();
    assert_eq!(record.access_count, 4);
    assert!(record.last_accessed_at.unwrap() >= record.created_at);
    assert!(record.validate().is_ok());
}

#[test]
fn tier_counts_and_removal() {
    let store = seeded();
    let counts = store.tier_counts("p");
    assert_eq!((counts.hot, counts.warm, counts.cold), (1, 1, 1));

    assert!(store.remove("p", "a").is_some());
    assert!(store.remove("p", "a").is_none());
    assert_eq!(store.tier_counts("p").hot, 0);
}
