//! # strata-core
//!
//! Foundation crate for the Strata tiering engine.
//! Defines the record model, scores, transitions, config, errors, traits and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod record;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::StrataConfig;
pub use errors::{StrataError, StrataResult};
pub use models::{Score, TierCapacities, Transition, TransitionReason};
pub use record::{ColdEncoding, Payload, Record, Tier, TransformedPayload};
