use chrono::{Duration, TimeZone, Utc};
use serde_json::json;
use strata_core::errors::InputError;
use strata_core::models::{TierCounts, Transition, TransitionReason};
use strata_core::record::*;
use strata_core::traits::RecordFilter;

fn make_record(id: &str, tier: Tier) -> Record {
    let created = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    Record {
        id: id.to_string(),
        created_at: created,
        last_accessed_at: Some(created + Duration::days(1)),
        importance: Some(60),
        access_count: 3,
        connection_count: 1,
        tier,
        payload: Payload::Plain(json!({"text": "hello"})),
    }
}

// ── Validation ───────────────────────────────────────────────────────────

#[test]
fn well_formed_record_validates() {
    assert!(make_record("r1", Tier::Hot).validate().is_ok());
}

#[test]
fn empty_id_is_rejected() {
    let record = make_record("  ", Tier::Warm);
    assert!(matches!(
        record.validate(),
        Err(InputError::InvalidRecord { .. })
    ));
}

#[test]
fn importance_above_100_is_rejected() {
    let mut record = make_record("r1", Tier::Warm);
    record.importance = Some(101);
    let err = record.validate().unwrap_err();
    assert!(err.to_string().contains("101"));
}

#[test]
fn access_before_creation_is_rejected() {
    let mut record = make_record("r1", Tier::Warm);
    record.last_accessed_at = Some(record.created_at - Duration::seconds(1));
    assert!(record.validate().is_err());
}

#[test]
fn never_accessed_record_is_touched_at_creation() {
    let mut record = make_record("r1", Tier::Cold);
    record.last_accessed_at = None;
    assert_eq!(record.last_touched_at(), record.created_at);
    assert!(record.validate().is_ok());
}

// ── Tier ─────────────────────────────────────────────────────────────────

#[test]
fn tiers_order_hot_above_warm_above_cold() {
    assert!(Tier::Hot > Tier::Warm);
    assert!(Tier::Warm > Tier::Cold);
    let mut tiers = vec![Tier::Warm, Tier::Cold, Tier::Hot];
    tiers.sort();
    assert_eq!(tiers, vec![Tier::Cold, Tier::Warm, Tier::Hot]);
}

#[test]
fn tier_serializes_lowercase_and_parses_back() {
    assert_eq!(serde_json::to_string(&Tier::Warm).unwrap(), "\"warm\"");
    for tier in Tier::ALL {
        assert_eq!(tier.as_str().parse::<Tier>().unwrap(), tier);
    }
    assert!("lukewarm".parse::<Tier>().is_err());
}

#[test]
fn only_moves_touching_cold_cross_the_boundary() {
    assert!(!Tier::Hot.crosses_cold_boundary(Tier::Warm));
    assert!(Tier::Warm.crosses_cold_boundary(Tier::Cold));
    assert!(Tier::Cold.crosses_cold_boundary(Tier::Hot));
    assert!(!Tier::Cold.crosses_cold_boundary(Tier::Cold));
}

// ── Payload ──────────────────────────────────────────────────────────────

#[test]
fn zstd_magic_is_detected() {
    let compacted = TransformedPayload {
        encoding: ColdEncoding::Zstd,
        checksum: String::new(),
        bytes: vec![0x28, 0xB5, 0x2F, 0xFD, 0x00],
    };
    let plain = TransformedPayload {
        encoding: ColdEncoding::Serialized,
        checksum: String::new(),
        bytes: b"{\"a\":1}".to_vec(),
    };
    assert!(compacted.looks_compacted());
    assert_eq!(compacted.inferred_encoding(), ColdEncoding::Zstd);
    assert!(!plain.looks_compacted());
    assert_eq!(plain.inferred_encoding(), ColdEncoding::Serialized);
}

#[test]
fn payload_serialization_records_representation() {
    let value = serde_json::to_value(Payload::Plain(json!(1))).unwrap();
    assert_eq!(value["representation"], "plain");
}

#[test]
fn payload_size_estimate_grows_with_content() {
    let small = Payload::Plain(json!({"a": "b"}));
    let large = Payload::Plain(json!({"a": "b".repeat(1000)}));
    assert!(large.estimated_bytes() > small.estimated_bytes());
}

// ── Transition & counts ──────────────────────────────────────────────────

#[test]
fn transition_direction_helpers() {
    let t = Transition {
        record_id: "r".into(),
        from_tier: Tier::Warm,
        to_tier: Tier::Cold,
        reason: TransitionReason::AgeDecay,
        score: 20.0,
        timestamp: Utc::now(),
    };
    assert!(t.is_demotion());
    assert!(!t.is_promotion());
    assert!(t.crosses_cold_boundary());
    assert_eq!(
        serde_json::to_string(&t.reason).unwrap(),
        "\"age_decay\""
    );
}

#[test]
fn tier_counts_tally_placements() {
    let counts = TierCounts::from_tiers([Tier::Hot, Tier::Cold, Tier::Cold]);
    assert_eq!(counts.hot, 1);
    assert_eq!(counts.warm, 0);
    assert_eq!(counts.cold, 2);
    assert_eq!(counts.total(), 3);
}

// ── Filter ───────────────────────────────────────────────────────────────

#[test]
fn filter_restricts_by_tier_and_id() {
    let hot = make_record("a", Tier::Hot);
    let cold = make_record("b", Tier::Cold);

    let by_tier = RecordFilter::default().with_tiers(vec![Tier::Hot]);
    assert!(by_tier.matches(&hot));
    assert!(!by_tier.matches(&cold));

    let by_id = RecordFilter::population("p").with_ids(vec!["b".into()]);
    assert!(!by_id.matches(&hot));
    assert!(by_id.matches(&cold));

    assert!(RecordFilter::default().matches(&hot));
}
