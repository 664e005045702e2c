use proptest::prelude::*;
use strata_core::models::{Score, TierCapacities, TierCounts};
use strata_core::record::Record;
use strata_rebalance::{apply_transitions, Rebalancer};
use strata_scoring::{ScoringContext, ScoringEngine};
use test_fixtures::{arb_population, fixed_now};

fn score_all(records: &[Record]) -> Vec<Score> {
    ScoringEngine::new()
        .score_batch(records, &ScoringContext::at(fixed_now()))
        .into_iter()
        .filter_map(|item| item.result.ok())
        .collect()
}

fn counts(records: &[Record]) -> TierCounts {
    TierCounts::from_tiers(records.iter().map(|r| r.tier))
}

proptest! {
    // ── Capacity invariant ──────────────────────────────────────────────

    #[test]
    fn applying_a_pass_respects_capacities(
        mut records in arb_population(80),
        hot in 0usize..12,
        warm in 0usize..24,
    ) {
        let caps = TierCapacities::new(hot, warm);
        let scores = score_all(&records);
        let plan = Rebalancer::new().rebalance(&records, &scores, caps, fixed_now());
        apply_transitions(&mut records, &plan.transitions);

        let after = counts(&records);
        prop_assert!(after.hot <= caps.hot, "hot {} > {}", after.hot, caps.hot);
        prop_assert!(after.warm <= caps.warm, "warm {} > {}", after.warm, caps.warm);
        prop_assert_eq!(after, plan.summary.after);
    }

    // ── At most one transition per record ───────────────────────────────

    #[test]
    fn no_record_receives_two_transitions(
        records in arb_population(80),
        hot in 0usize..12,
        warm in 0usize..24,
    ) {
        let scores = score_all(&records);
        let plan = Rebalancer::new()
            .rebalance(&records, &scores, TierCapacities::new(hot, warm), fixed_now());
        let mut ids: Vec<_> = plan.transitions.iter().map(|t| &t.record_id).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), total);
        for t in &plan.transitions {
            prop_assert_ne!(t.from_tier, t.to_tier);
        }
    }

    // ── No oscillation ──────────────────────────────────────────────────

    #[test]
    fn second_pass_never_reverses_the_first(
        mut records in arb_population(80),
        hot in 0usize..12,
        warm in 0usize..24,
    ) {
        let caps = TierCapacities::new(hot, warm);
        let scores = score_all(&records);
        let rebalancer = Rebalancer::new();

        let first = rebalancer.rebalance(&records, &scores, caps, fixed_now());
        apply_transitions(&mut records, &first.transitions);
        let second = rebalancer.rebalance(&records, &scores, caps, fixed_now());

        for t2 in &second.transitions {
            let reversed = first
                .transitions
                .iter()
                .any(|t1| t1.record_id == t2.record_id && t1.from_tier == t2.to_tier);
            prop_assert!(!reversed, "{} oscillated", t2.record_id);
        }
        apply_transitions(&mut records, &second.transitions);
        let after = counts(&records);
        prop_assert!(after.hot <= caps.hot);
        prop_assert!(after.warm <= caps.warm);
    }

    // ── Determinism ─────────────────────────────────────────────────────

    #[test]
    fn identical_input_yields_identical_plan(
        records in arb_population(60),
        hot in 0usize..8,
        warm in 0usize..16,
    ) {
        let caps = TierCapacities::new(hot, warm);
        let scores = score_all(&records);
        let a = Rebalancer::new().rebalance(&records, &scores, caps, fixed_now());
        let b = Rebalancer::new().rebalance(&records, &scores, caps, fixed_now());
        prop_assert_eq!(a, b);
    }
}
