//! # strata-compaction
//!
//! The content transform applied across the warm/cold boundary. Demotion serializes a
//! payload, checksums it with blake3, and compacts it with zstd when enabled. Promotion
//! detects the representation, reverses it, and verifies the checksum; when anything
//! fails it hands the input back verbatim with an explicit fallback reason.

pub mod checksum;
pub mod codec;
pub mod engine;
pub mod stats;

pub use engine::CompactionEngine;
pub use stats::CompactionStats;
