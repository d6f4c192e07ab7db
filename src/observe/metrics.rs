//! Call Metrics Module
//!
//! In-process accumulation of per-operation call counts and latencies.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use super::{Component, Observer, Operation};

// == Call Stats ==
/// Aggregated figures for one (component, operation) pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CallStats {
    /// Number of calls made
    pub calls: u64,
    /// Number of calls that failed or timed out
    pub errors: u64,
    /// Sum of call durations in microseconds
    pub total_micros: u64,
    /// Slowest call in microseconds
    pub max_micros: u64,
    /// Mean call duration in microseconds
    pub mean_micros: u64,
}

impl CallStats {
    fn record(&mut self, elapsed: Duration, ok: bool) {
        let micros = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        self.calls += 1;
        if !ok {
            self.errors += 1;
        }
        self.total_micros = self.total_micros.saturating_add(micros);
        self.max_micros = self.max_micros.max(micros);
        self.mean_micros = self.total_micros / self.calls;
    }
}

/// Point-in-time copy of all metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricsSnapshot {
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub hit_rate: f64,
    /// Keyed as `component.operation`, e.g. `store.get`
    pub calls: BTreeMap<String, CallStats>,
}

#[derive(Debug, Default)]
struct Inner {
    hits: u64,
    misses: u64,
    calls: BTreeMap<(Component, Operation), CallStats>,
}

// == Call Metrics ==
/// Thread-safe observer that keeps running totals and logs each call at debug level.
#[derive(Debug, Default)]
pub struct CallMetrics {
    inner: Mutex<Inner>,
}

impl CallMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns stats for a single pair, if any call has been recorded.
    pub fn get(&self, component: Component, operation: Operation) -> Option<CallStats> {
        let inner = self.inner.lock().ok()?;
        inner.calls.get(&(component, operation)).cloned()
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let Ok(inner) = self.inner.lock() else {
            return MetricsSnapshot::default();
        };

        let lookups = inner.hits + inner.misses;
        let hit_rate = if lookups == 0 {
            0.0
        } else {
            inner.hits as f64 / lookups as f64
        };

        MetricsSnapshot {
            cache_hits: inner.hits,
            cache_misses: inner.misses,
            hit_rate,
            calls: inner
                .calls
                .iter()
                .map(|((c, o), stats)| (format!("{}.{}", c, o), stats.clone()))
                .collect(),
        }
    }
}

impl Observer for CallMetrics {
    fn record_call(&self, component: Component, operation: Operation, elapsed: Duration, ok: bool) {
        debug!(%component, %operation, elapsed_us = elapsed.as_micros() as u64, ok, "call");

        // A poisoned lock only loses metrics.
        if let Ok(mut inner) = self.inner.lock() {
            inner
                .calls
                .entry((component, operation))
                .or_default()
                .record(elapsed, ok);
        }
    }

    fn record_lookup(&self, hit: bool) {
        if let Ok(mut inner) = self.inner.lock() {
            if hit {
                inner.hits += 1;
            } else {
                inner.misses += 1;
            }
        }
    }
}
