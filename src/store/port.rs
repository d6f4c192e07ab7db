//! Store Port Module

use async_trait::async_trait;

use crate::error::Result;

// == Store Port ==
/// A fixed set of key-value tables, one per shard.
///
/// Failures of any kind surface as `KvError::StoreUnavailable`. A missing row
/// is `Ok(None)`, not an error.
#[async_trait]
pub trait StorePort: Send + Sync {
    /// Point lookup of `key` within one shard.
    async fn get(&self, shard: usize, key: &str) -> Result<Option<String>>;

    /// Insert-or-replace `key` within one shard.
    ///
    /// Atomic per call; repeating the same upsert leaves the same single row.
    async fn upsert(&self, shard: usize, key: &str, value: &str) -> Result<()>;

    /// Number of shards this store was opened with.
    fn shard_count(&self) -> usize;
}
