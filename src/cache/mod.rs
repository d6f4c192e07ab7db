//! Cache Module
//!
//! The cache port used by the coordinator, plus an in-memory TTL cache with
//! LRU eviction that implements it.

mod entry;
mod lru;
mod port;
mod store;

pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use port::{CachePort, MemoryCache};
pub use store::CacheStore;
