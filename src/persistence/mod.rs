//! Persistence contract for universes and the stores that honour it

pub mod record;
pub mod store;

pub use record::UniverseRecord;
pub use store::{JsonFileStore, MemoryStore, UniverseStore};
