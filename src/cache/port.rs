//! Cache Port Module
//!
//! The narrow interface the coordinator uses to reach a TTL cache, and the
//! in-memory adapter behind it.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::CacheStore;
use crate::error::Result;

// == Cache Port ==
/// TTL-keyed string cache.
///
/// `get` distinguishes a miss (`Ok(None)`) from an unreachable cache
/// (`Err(KvError::CacheUnavailable)`). A cached empty string is `Ok(Some(""))`.
#[async_trait]
pub trait CachePort: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key` for `ttl`. Last write wins.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;
}

// == Memory Cache ==
/// Shared handle to an in-process [`CacheStore`].
///
/// Clones share the same underlying store.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    inner: Arc<RwLock<CacheStore>>,
}

impl MemoryCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(CacheStore::new(max_entries))),
        }
    }

    /// Drops expired entries; used by the cleanup task.
    pub async fn cleanup_expired(&self) -> usize {
        self.inner.write().await.cleanup_expired()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn evictions(&self) -> u64 {
        self.inner.read().await.evictions()
    }
}

#[async_trait]
impl CachePort for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        // Write lock: reads update LRU order and drop expired entries.
        Ok(self.inner.write().await.get(key))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        self.inner
            .write()
            .await
            .set(key.to_string(), value.to_string(), ttl);
        Ok(())
    }
}
