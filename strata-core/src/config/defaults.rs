// Single source of truth for all default values.

// --- Scoring: top-level weights (sum to 1.0) ---
pub const DEFAULT_ACCESS_WEIGHT: f64 = 0.35;
pub const DEFAULT_IMPORTANCE_WEIGHT: f64 = 0.30;
pub const DEFAULT_AGE_WEIGHT: f64 = 0.20;
pub const DEFAULT_CONNECTION_WEIGHT: f64 = 0.15;

// --- Scoring: access mix (sum to 1.0) ---
pub const DEFAULT_RECENCY_WEIGHT: f64 = 0.6;
pub const DEFAULT_FREQUENCY_WEIGHT: f64 = 0.4;

// --- Scoring: decay and scale constants ---
pub const DEFAULT_RECENCY_DECAY_PER_DAY: f64 = 2.0;
pub const DEFAULT_AGE_DECAY_PER_DAY: f64 = 1.0;
pub const DEFAULT_FREQUENCY_PER_ACCESS: f64 = 5.0;
pub const DEFAULT_CONNECTION_PER_LINK: f64 = 10.0;
pub const DEFAULT_IMPORTANCE: u8 = 50;

// --- Scoring: tier thresholds ---
pub const DEFAULT_HOT_THRESHOLD: f64 = 75.0;
pub const DEFAULT_WARM_THRESHOLD: f64 = 40.0;

// --- Rebalancing ---
pub const DEFAULT_HOT_CAPACITY: usize = 1_000;
pub const DEFAULT_WARM_CAPACITY: usize = 10_000;
pub const DEFAULT_HOT_DEMOTION_WARM_FLOOR: f64 = 40.0;
pub const DEFAULT_WARM_FLOOR: f64 = 25.0;
pub const DEFAULT_COLD_PROMOTION_THRESHOLD: f64 = 40.0;

// --- Compaction ---
pub const DEFAULT_COMPACTION_ENABLED: bool = true;
pub const DEFAULT_COMPACTION_LEVEL: i32 = 3;
pub const MIN_COMPACTION_LEVEL: i32 = 1;
pub const MAX_COMPACTION_LEVEL: i32 = 22;
pub const DEFAULT_COMPACTION_MIN_BYTES: usize = 64;

// --- Execution host ---
pub const DEFAULT_HOST_WORKERS: usize = 10;
pub const DEFAULT_HOST_QUEUE_CAPACITY: usize = 256;
pub const DEFAULT_TASK_TIMEOUT_MS: u64 = 30_000;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_JSON: bool = true;
