//! Record store implementations.

mod memory;

pub use memory::InMemoryRecordStore;
