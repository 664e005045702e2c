pub mod batch;
pub mod capacities;
pub mod score;
pub mod tier_counts;
pub mod transition;

pub use batch::{ItemResult, SkippedRecord};
pub use capacities::TierCapacities;
pub use score::Score;
pub use tier_counts::TierCounts;
pub use transition::{Transition, TransitionReason};
