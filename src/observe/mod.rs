//! Observe Module
//!
//! Side-channel reporting of cache and store call latencies.

mod metrics;

pub use metrics::{CallMetrics, CallStats, MetricsSnapshot};

use std::fmt;
use std::time::Duration;

use serde::Serialize;

/// Collaborator a timed call was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Component {
    Cache,
    Store,
}

/// Operation label for a timed call. `Set` covers the store upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Get,
    Set,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Cache => write!(f, "cache"),
            Component::Store => write!(f, "store"),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Get => write!(f, "get"),
            Operation::Set => write!(f, "set"),
        }
    }
}

// == Observer ==
/// Receives timing and hit/miss signals from the coordinator.
///
/// Methods return nothing so an observer can never alter a read or write outcome.
pub trait Observer: Send + Sync {
    /// Records one cache or store call.
    fn record_call(&self, component: Component, operation: Operation, elapsed: Duration, ok: bool);

    /// Records the result of a cache lookup that did not error.
    fn record_lookup(&self, _hit: bool) {}
}

/// Observer that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    fn record_call(&self, _: Component, _: Operation, _: Duration, _: bool) {}
}
