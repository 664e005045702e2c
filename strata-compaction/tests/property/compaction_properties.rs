use proptest::prelude::*;
use strata_compaction::CompactionEngine;
use strata_core::config::CompactionConfig;
use strata_core::record::Payload;
use strata_core::traits::IContentTransform;
use test_fixtures::arb_json;

proptest! {
    #[test]
    fn promote_inverts_demote(value in arb_json(), enabled in any::<bool>(), level in 1i32..=9) {
        let engine = CompactionEngine::with_config(CompactionConfig {
            enabled,
            level,
            min_bytes: 0,
        });
        let cold = engine.demote(&value).unwrap();
        let outcome = engine.promote(&cold);
        prop_assert!(!outcome.used_fallback(), "{:?}", outcome.fallback);
        prop_assert_eq!(outcome.payload, Payload::Plain(value));
    }

    #[test]
    fn promote_never_panics_on_arbitrary_bytes(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
        let engine = CompactionEngine::new();
        let mut cold = engine.demote(&serde_json::json!(null)).unwrap();
        cold.bytes = bytes;
        let outcome = engine.promote(&cold);
        if outcome.used_fallback() {
            prop_assert_eq!(outcome.payload, Payload::Cold(cold));
        }
    }
}
