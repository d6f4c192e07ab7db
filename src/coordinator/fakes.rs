//! Fault-injecting port implementations for coordinator tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::cache::CachePort;
use crate::error::{KvError, Result};
use crate::observe::{Component, Observer, Operation};
use crate::store::StorePort;

/// Cache whose every call fails.
pub struct BrokenCache;

#[async_trait]
impl CachePort for BrokenCache {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(KvError::CacheUnavailable("connection refused".into()))
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<()> {
        Err(KvError::CacheUnavailable("connection refused".into()))
    }
}

/// Cache that accepts writes and never remembers them.
pub struct MissingCache;

#[async_trait]
impl CachePort for MissingCache {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<()> {
        Ok(())
    }
}

/// Cache that stalls for the given duration before missing.
pub struct SlowCache(pub Duration);

#[async_trait]
impl CachePort for SlowCache {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        tokio::time::sleep(self.0).await;
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<()> {
        tokio::time::sleep(self.0).await;
        Ok(())
    }
}

/// Store whose every call fails.
pub struct BrokenStore {
    shards: usize,
}

impl BrokenStore {
    pub fn new(shards: usize) -> Self {
        Self { shards }
    }
}

#[async_trait]
impl StorePort for BrokenStore {
    async fn get(&self, shard: usize, _key: &str) -> Result<Option<String>> {
        Err(KvError::StoreUnavailable(format!("shard {} unreachable", shard)))
    }

    async fn upsert(&self, shard: usize, _key: &str, _value: &str) -> Result<()> {
        Err(KvError::StoreUnavailable(format!("shard {} unreachable", shard)))
    }

    fn shard_count(&self) -> usize {
        self.shards
    }
}

/// Observer that keeps every signal in order.
#[derive(Default)]
pub struct RecordingObserver {
    calls: Mutex<Vec<(Component, Operation, bool)>>,
    lookups: Mutex<Vec<bool>>,
}

impl RecordingObserver {
    pub fn calls(&self) -> Vec<(Component, Operation, bool)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, component: Component) -> usize {
        self.calls()
            .iter()
            .filter(|(c, _, _)| *c == component)
            .count()
    }

    pub fn lookups(&self) -> Vec<bool> {
        self.lookups.lock().unwrap().clone()
    }
}

impl Observer for RecordingObserver {
    fn record_call(&self, component: Component, operation: Operation, _: Duration, ok: bool) {
        self.calls.lock().unwrap().push((component, operation, ok));
    }

    fn record_lookup(&self, hit: bool) {
        self.lookups.lock().unwrap().push(hit);
    }
}
