//! # strata-observability
//!
//! Structured tracing for the tier engine: subscriber setup driven by `STRATA_LOG`,
//! span macros per operation, and structured events for transitions, payload
//! fallbacks, and host task failures.

pub mod tracing_setup;

pub use tracing_setup::{init_from_config, init_tracing, init_tracing_with_filter, LOG_ENV_VAR};
