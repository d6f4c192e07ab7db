//! Shardcache - a key-value service in front of a sharded store
//!
//! Reads are served cache-aside: cache first, then the key's shard, then a
//! cache fill. Writes go to the shard first and are written through to the cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod models;
pub mod observe;
pub mod shard;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use coordinator::{CacheAside, FillOutcome, ReadOutcome, WriteOutcome};
pub use error::{KvError, Result};
pub use tasks::spawn_cleanup_task;
