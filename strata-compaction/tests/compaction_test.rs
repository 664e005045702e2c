use serde_json::json;
use strata_compaction::{checksum, codec, CompactionEngine};
use strata_core::config::CompactionConfig;
use strata_core::constants::{MAX_PAYLOAD_DEPTH, ZSTD_MAGIC};
use strata_core::errors::TransformError;
use strata_core::record::{ColdEncoding, Payload};
use strata_core::traits::IContentTransform;

fn large_payload() -> serde_json::Value {
    json!({
        "title": "quarterly report",
        "body": "lorem ipsum dolor sit amet ".repeat(40),
        "tags": ["finance", "archive", "finance", "archive"],
    })
}

fn disabled() -> CompactionEngine {
    CompactionEngine::with_config(CompactionConfig {
        enabled: false,
        ..CompactionConfig::default()
    })
}

// ── Demote ──────────────────────────────────────────────────────────────

#[test]
fn large_payload_is_compacted_with_zstd() {
    let engine = CompactionEngine::new();
    let (cold, stats) = engine.demote_with_stats(&large_payload()).unwrap();
    assert_eq!(cold.encoding, ColdEncoding::Zstd);
    assert!(cold.looks_compacted());
    assert_eq!(&cold.bytes[..4], &ZSTD_MAGIC);
    assert!(stats.stored_bytes < stats.original_bytes);
    assert!(stats.ratio() > 1.0);
    assert!(stats.savings_percent() > 0.0);
}

#[test]
fn small_payload_stays_serialized() {
    let engine = CompactionEngine::new();
    let cold = engine.demote(&json!({"a": 1})).unwrap();
    assert_eq!(cold.encoding, ColdEncoding::Serialized);
    assert_eq!(cold.bytes, br#"{"a":1}"#.to_vec());
}

#[test]
fn disabled_compaction_still_marks_cold_representation() {
    let engine = disabled();
    let cold = engine.demote(&large_payload()).unwrap();
    assert_eq!(cold.encoding, ColdEncoding::Serialized);
    assert!(!cold.looks_compacted());

    let outcome = engine.promote(&cold);
    assert!(!outcome.used_fallback());
    assert_eq!(outcome.payload, Payload::Plain(large_payload()));
}

#[test]
fn checksum_covers_the_serialized_form() {
    let value = large_payload();
    let cold = CompactionEngine::new().demote(&value).unwrap();
    let serialized = serde_json::to_vec(&value).unwrap();
    assert_eq!(cold.checksum, checksum::digest(&serialized));
    assert_eq!(cold.checksum.len(), 64);
}

#[test]
fn demotion_is_deterministic() {
    let engine = CompactionEngine::new();
    assert_eq!(
        engine.demote(&large_payload()).unwrap(),
        engine.demote(&large_payload()).unwrap()
    );
}

// ── Promote ─────────────────────────────────────────────────────────────

#[test]
fn round_trip_restores_payload() {
    let engine = CompactionEngine::new();
    for value in [large_payload(), json!(null), json!([]), json!("text"), json!(42)] {
        let outcome = engine.promote(&engine.demote(&value).unwrap());
        assert_eq!(outcome.fallback, None);
        assert_eq!(outcome.payload, Payload::Plain(value));
    }
}

#[test]
fn floats_survive_the_round_trip_exactly() {
    let engine = CompactionEngine::new();
    let value = json!({
        "f": 1.0715660391465826e-75,
        "g": [0.1, 2.5e300, -7.000000000000001, f64::MIN_POSITIVE],
    });
    let outcome = engine.promote(&engine.demote(&value).unwrap());
    assert_eq!(outcome.fallback, None);
    assert_eq!(outcome.payload, Payload::Plain(value));
}

fn nested(depth: usize) -> serde_json::Value {
    (0..depth).fold(json!(1), |inner, _| json!([inner]))
}

#[test]
fn payload_too_deep_to_parse_back_is_rejected_at_demote() {
    let engine = CompactionEngine::new();
    assert_eq!(codec::nesting_depth(&nested(200)), 200);

    let err = engine.demote_with_stats(&nested(200)).unwrap_err();
    assert!(matches!(err, TransformError::Serialization { .. }), "{err:?}");
    assert!(engine.demote(&nested(200)).is_err());
}

#[test]
fn deepest_accepted_payload_round_trips() {
    let engine = CompactionEngine::new();
    let value = nested(MAX_PAYLOAD_DEPTH);
    let outcome = engine.promote(&engine.demote(&value).unwrap());
    assert_eq!(outcome.fallback, None);
    assert_eq!(outcome.payload, Payload::Plain(value));
}

#[test]
fn compacted_payload_promotes_under_a_disabled_engine() {
    let cold = CompactionEngine::new().demote(&large_payload()).unwrap();
    let outcome = disabled().promote(&cold);
    assert!(!outcome.used_fallback());
    assert_eq!(outcome.payload, Payload::Plain(large_payload()));
}

#[test]
fn corrupt_frame_falls_back_to_verbatim_input() {
    let engine = CompactionEngine::new();
    let mut cold = engine.demote(&large_payload()).unwrap();
    let len = cold.bytes.len();
    cold.bytes.truncate(len / 2);

    let outcome = engine.promote(&cold);
    assert!(outcome.used_fallback());
    assert_eq!(outcome.payload, Payload::Cold(cold));
}

#[test]
fn tampered_bytes_fail_checksum() {
    let engine = CompactionEngine::new();
    let mut cold = engine.demote(&json!({"a": 1})).unwrap();
    cold.bytes = br#"{"a":2}"#.to_vec();

    let err = engine.restore(&cold).unwrap_err();
    assert!(matches!(err, TransformError::ChecksumMismatch { .. }));
    assert!(engine.promote(&cold).used_fallback());
}

#[test]
fn recorded_encoding_must_match_bytes() {
    let engine = CompactionEngine::new();
    let mut cold = engine.demote(&json!({"a": 1})).unwrap();
    cold.encoding = ColdEncoding::Zstd;

    let err = engine.restore(&cold).unwrap_err();
    assert!(matches!(err, TransformError::DecompactionFailed { .. }));
    let outcome = engine.promote(&cold);
    assert!(outcome.fallback.unwrap().contains("does not match"));
}

#[test]
fn garbage_serialized_bytes_fall_back() {
    let engine = CompactionEngine::new();
    let mut cold = engine.demote(&json!({"a": 1})).unwrap();
    cold.bytes = b"not json".to_vec();
    cold.checksum = checksum::digest(&cold.bytes);

    let err = engine.restore(&cold).unwrap_err();
    assert!(matches!(err, TransformError::Serialization { .. }));
    assert!(engine.promote(&cold).used_fallback());
}

// ── Payload-level helpers ───────────────────────────────────────────────

#[test]
fn plain_payload_is_never_decompacted() {
    let engine = CompactionEngine::new();
    let plain = Payload::Plain(json!({"a": 1}));
    let outcome = engine.promote_payload(&plain);
    assert_eq!(outcome.payload, plain);
    assert!(!outcome.used_fallback());
}

#[test]
fn cold_payload_is_never_recompacted() {
    let engine = CompactionEngine::new();
    let cold = engine.demote_payload(&Payload::Plain(large_payload())).unwrap();
    assert!(cold.is_cold());
    assert_eq!(engine.demote_payload(&cold).unwrap(), cold);
}
