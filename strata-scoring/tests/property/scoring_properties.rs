use proptest::prelude::*;
use strata_core::config::ScoringConfig;
use strata_scoring::{ScoringContext, ScoringEngine};
use test_fixtures::{arb_record, fixed_now};

proptest! {
    // ── Score bounds ────────────────────────────────────────────────────

    #[test]
    fn every_sub_score_and_total_in_range(record in arb_record()) {
        let score = ScoringEngine::new()
            .score_with_context(&record, &ScoringContext::at(fixed_now()))
            .unwrap();
        for component in score.components() {
            prop_assert!((0.0..=100.0).contains(&component));
        }
        prop_assert!((0.0..=100.0).contains(&score.total));
    }

    // ── Determinism ─────────────────────────────────────────────────────

    #[test]
    fn scoring_is_deterministic(record in arb_record()) {
        let engine = ScoringEngine::new();
        let ctx = ScoringContext::at(fixed_now());
        let a = engine.score_with_context(&record, &ctx).unwrap();
        let b = engine.score_with_context(&record, &ctx).unwrap();
        prop_assert_eq!(a, b);
    }

    // ── Convex combination ──────────────────────────────────────────────

    #[test]
    fn total_is_weighted_sum_of_components(record in arb_record()) {
        let config = ScoringConfig::default();
        let score = ScoringEngine::with_config(config.clone())
            .score_with_context(&record, &ScoringContext::at(fixed_now()))
            .unwrap();
        let w = config.weights;
        let expected = w.access * score.access
            + w.importance * score.importance
            + w.age * score.age
            + w.connection * score.connection;
        prop_assert!((score.total - expected).abs() < 1e-9);
    }

    // ── Tier agrees with thresholds ─────────────────────────────────────

    #[test]
    fn recommended_tier_follows_thresholds(record in arb_record()) {
        use strata_core::record::Tier;
        let score = ScoringEngine::new()
            .score_with_context(&record, &ScoringContext::at(fixed_now()))
            .unwrap();
        let expected = if score.total >= 75.0 {
            Tier::Hot
        } else if score.total >= 40.0 {
            Tier::Warm
        } else {
            Tier::Cold
        };
        prop_assert_eq!(score.recommended_tier, expected);
    }
}
