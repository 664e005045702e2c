/// Strata version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Seconds in one day, the unit every decay rate is expressed in.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Lower bound of every sub-score and of the total score.
pub const SCORE_MIN: f64 = 0.0;

/// Upper bound of every sub-score and of the total score.
pub const SCORE_MAX: f64 = 100.0;

/// Highest importance a record may carry.
pub const MAX_IMPORTANCE: u8 = 100;

/// Tolerance used when checking that configured weights sum to 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Zstd frame magic number, little-endian.
pub const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// Population name used when a caller does not partition its records.
pub const DEFAULT_POPULATION: &str = "default";

/// Deepest array/object nesting a payload may have to be demoted. Kept below the JSON
/// parser's recursion limit (128) so every demoted payload can be parsed back.
pub const MAX_PAYLOAD_DEPTH: usize = 100;
