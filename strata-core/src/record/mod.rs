pub mod base;
pub mod payload;
pub mod tier;

pub use base::Record;
pub use payload::{estimate_value_bytes, ColdEncoding, Payload, TransformedPayload};
pub use tier::Tier;
