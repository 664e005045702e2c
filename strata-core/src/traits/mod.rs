pub mod content_transform;
pub mod record_store;
pub mod scorer;

pub use content_transform::{IContentTransform, PromoteOutcome};
pub use record_store::{IRecordStore, RecordFilter};
pub use scorer::IScorer;
