use strata_core::config::ScoringConfig;
use strata_core::record::Tier;

/// Map a total score to a tier: hot at or above the hot threshold, warm at or above
/// the warm threshold, cold otherwise.
pub fn recommend_tier(total: f64, config: &ScoringConfig) -> Tier {
    if total >= config.hot_threshold {
        Tier::Hot
    } else if total >= config.warm_threshold {
        Tier::Warm
    } else {
        Tier::Cold
    }
}
