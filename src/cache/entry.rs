//! Cache Entry Module
//!
//! A cached value with a fixed expiry deadline.

use std::time::{Duration, Instant};

/// Lifetime used when `now + ttl` would overflow the clock.
const MAX_LIFETIME: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

// == Cache Entry ==
/// A single cached value and the instant it stops being served.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value; may be empty
    pub value: String,
    /// Deadline after which the entry reads as absent
    pub expires_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry that expires `ttl` from now.
    pub fn new(value: String, ttl: Duration) -> Self {
        let now = Instant::now();
        Self {
            value,
            expires_at: now
                .checked_add(ttl)
                .unwrap_or_else(|| now + MAX_LIFETIME),
        }
    }

    // == Is Expired ==
    /// An entry is expired once the current instant reaches its deadline.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}
