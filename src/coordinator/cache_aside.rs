//! Cache-Aside Coordinator
//!
//! Reads go cache, then store, then cache fill. Writes go store, then cache.
//! The store is authoritative; cache writes after a store operation are
//! best-effort and never change the caller-visible result.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, warn};

use crate::cache::CachePort;
use crate::coordinator::{FillOutcome, ReadOutcome, WriteOutcome};
use crate::error::{KvError, Result};
use crate::observe::{Component, Observer, Operation};
use crate::shard::ShardRouter;
use crate::store::StorePort;

// == Cache Aside ==
/// Orchestrates the read and write paths over injected ports.
///
/// Holds no per-request state; one instance is shared by all requests.
pub struct CacheAside {
    cache: Arc<dyn CachePort>,
    store: Arc<dyn StorePort>,
    router: Arc<dyn ShardRouter>,
    observer: Arc<dyn Observer>,
    /// TTL applied to every cache fill
    ttl: Duration,
    /// Budget for all port calls made on behalf of one read or write
    request_timeout: Duration,
}

impl CacheAside {
    /// Wires the coordinator.
    ///
    /// Fails with `InvalidInput` if the router and store disagree on the number
    /// of shards.
    pub fn new(
        cache: Arc<dyn CachePort>,
        store: Arc<dyn StorePort>,
        router: Arc<dyn ShardRouter>,
        observer: Arc<dyn Observer>,
        ttl: Duration,
        request_timeout: Duration,
    ) -> Result<Self> {
        if router.shard_count() != store.shard_count() {
            return Err(KvError::InvalidInput(format!(
                "Router spans {} shards but store has {}",
                router.shard_count(),
                store.shard_count()
            )));
        }

        Ok(Self {
            cache,
            store,
            router,
            observer,
            ttl,
            request_timeout,
        })
    }

    pub fn shard_count(&self) -> usize {
        self.router.shard_count()
    }

    pub fn shard_for(&self, key: &str) -> usize {
        self.router.shard_for(key)
    }

    // == Read ==
    /// Returns the value for `key`.
    ///
    /// A cache lookup error is returned as `CacheUnavailable` without falling
    /// through to the store. A failed cache fill after a store hit is logged
    /// and reported in the outcome only. All calls share one request deadline.
    pub async fn read(&self, key: &str) -> Result<ReadOutcome> {
        let deadline = Instant::now() + self.request_timeout;
        let cached = self
            .call(deadline, Component::Cache, Operation::Get, self.cache.get(key))
            .await?;
        self.observer.record_lookup(cached.is_some());

        if let Some(value) = cached {
            debug!(key, "cache hit");
            return Ok(ReadOutcome::Hit { value });
        }

        let shard = self.router.shard_for(key);
        let stored = self
            .call(
                deadline,
                Component::Store,
                Operation::Get,
                self.store.get(shard, key),
            )
            .await?;

        let Some(value) = stored else {
            debug!(key, shard, "not found");
            return Ok(ReadOutcome::NotFound { shard });
        };

        let fill = self.fill(deadline, key, &value).await;
        Ok(ReadOutcome::Filled { value, shard, fill })
    }

    // == Write ==
    /// Upserts `key` into its shard, then writes the value through to the cache.
    ///
    /// No cache mutation happens if the upsert fails. A failed write-through
    /// leaves the previous cache entry in place until it expires.
    pub async fn write(&self, key: &str, value: &str) -> Result<WriteOutcome> {
        let deadline = Instant::now() + self.request_timeout;
        let shard = self.router.shard_for(key);
        self.call(
            deadline,
            Component::Store,
            Operation::Set,
            self.store.upsert(shard, key, value),
        )
        .await?;

        let fill = self.fill(deadline, key, value).await;
        Ok(WriteOutcome { shard, fill })
    }

    async fn fill(&self, deadline: Instant, key: &str, value: &str) -> FillOutcome {
        match self
            .call(
                deadline,
                Component::Cache,
                Operation::Set,
                self.cache.set(key, value, self.ttl),
            )
            .await
        {
            Ok(()) => FillOutcome::Filled,
            Err(err) => {
                warn!(key, error = %err, "cache fill failed, entry left to expire");
                FillOutcome::Failed(err.to_string())
            }
        }
    }

    /// Runs one port call until `deadline`, normalises its error to the
    /// component's `Unavailable` variant and reports the timing.
    ///
    /// A call started after the deadline has passed fails without being polled.
    async fn call<T, F>(
        &self,
        deadline: Instant,
        component: Component,
        operation: Operation,
        fut: F,
    ) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let started = Instant::now();
        let result = if started >= deadline {
            Err(deadline_exceeded(component, operation, self.request_timeout))
        } else {
            match tokio::time::timeout_at(deadline, fut).await {
                Ok(result) => result.map_err(|err| unavailable(component, err)),
                Err(_) => Err(deadline_exceeded(component, operation, self.request_timeout)),
            }
        };

        self.observer
            .record_call(component, operation, started.elapsed(), result.is_ok());
        result
    }
}

fn deadline_exceeded(component: Component, operation: Operation, budget: Duration) -> KvError {
    unavailable_msg(
        component,
        format!(
            "{} {} timed out: request deadline of {}ms exceeded",
            component,
            operation,
            budget.as_millis()
        ),
    )
}

fn unavailable(component: Component, err: KvError) -> KvError {
    match (component, err) {
        (Component::Cache, err @ KvError::CacheUnavailable(_)) => err,
        (Component::Store, err @ KvError::StoreUnavailable(_)) => err,
        (component, err) => unavailable_msg(component, err.to_string()),
    }
}

fn unavailable_msg(component: Component, msg: String) -> KvError {
    match component {
        Component::Cache => KvError::CacheUnavailable(msg),
        Component::Store => KvError::StoreUnavailable(msg),
    }
}
