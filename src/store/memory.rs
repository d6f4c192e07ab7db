//! Sharded Memory Store Module
//!
//! One in-process table per shard, each behind its own lock so shards never
//! contend with each other.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{KvError, Result};
use crate::store::StorePort;

type Table = RwLock<HashMap<String, String>>;

// == Sharded Memory Store ==
#[derive(Debug)]
pub struct ShardedMemoryStore {
    shards: Vec<Table>,
}

impl ShardedMemoryStore {
    /// Opens `shard_count` empty tables. The count is fixed from here on.
    pub fn new(shard_count: usize) -> Self {
        Self {
            shards: (0..shard_count).map(|_| Table::default()).collect(),
        }
    }

    fn table(&self, shard: usize) -> Result<&Table> {
        self.shards.get(shard).ok_or_else(|| {
            KvError::StoreUnavailable(format!(
                "shard {} does not exist ({} configured)",
                shard,
                self.shards.len()
            ))
        })
    }

    /// Number of rows held by one shard.
    pub async fn row_count(&self, shard: usize) -> Result<usize> {
        Ok(self.table(shard)?.read().await.len())
    }

    /// Shards currently holding a row for `key`.
    pub async fn shards_holding(&self, key: &str) -> Vec<usize> {
        let mut holding = Vec::new();
        for (index, table) in self.shards.iter().enumerate() {
            if table.read().await.contains_key(key) {
                holding.push(index);
            }
        }
        holding
    }
}

#[async_trait]
impl StorePort for ShardedMemoryStore {
    async fn get(&self, shard: usize, key: &str) -> Result<Option<String>> {
        Ok(self.table(shard)?.read().await.get(key).cloned())
    }

    async fn upsert(&self, shard: usize, key: &str, value: &str) -> Result<()> {
        let replaced = self
            .table(shard)?
            .write()
            .await
            .insert(key.to_string(), value.to_string())
            .is_some();
        debug!(shard, key, replaced, "upsert");
        Ok(())
    }

    fn shard_count(&self) -> usize {
        self.shards.len()
    }
}
