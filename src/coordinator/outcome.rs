//! Coordinator Outcome Types
//!
//! Separate the primary result of a read or write from the best-effort cache
//! fill that follows it.

/// Result of the best-effort cache write after a store read or upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillOutcome {
    Filled,
    /// The cache may serve a stale or missing entry until TTL expiry.
    Failed(String),
}

impl FillOutcome {
    pub fn is_filled(&self) -> bool {
        matches!(self, FillOutcome::Filled)
    }
}

/// Successful result of a read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// Served from the cache; the store was not touched.
    Hit { value: String },
    /// Cache miss served from the store, followed by a cache fill.
    Filled {
        value: String,
        shard: usize,
        fill: FillOutcome,
    },
    /// Neither cache nor store holds the key.
    NotFound { shard: usize },
}

impl ReadOutcome {
    pub fn value(&self) -> Option<&str> {
        match self {
            ReadOutcome::Hit { value } | ReadOutcome::Filled { value, .. } => Some(value),
            ReadOutcome::NotFound { .. } => None,
        }
    }

    pub fn into_value(self) -> Option<String> {
        match self {
            ReadOutcome::Hit { value } | ReadOutcome::Filled { value, .. } => Some(value),
            ReadOutcome::NotFound { .. } => None,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, ReadOutcome::Hit { .. })
    }
}

/// Successful result of a write. The store holds the new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    pub shard: usize,
    pub fill: FillOutcome,
}
