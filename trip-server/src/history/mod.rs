//! Named snapshot history, persisted through a key-value interface.

mod kv;
mod seed;
mod store;

pub use kv::{FileStore, KvStore, MemoryStore};
pub use seed::SeedError;
pub use store::{HistoryStore, SavedTrip};
