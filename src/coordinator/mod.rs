//! Coordinator Module
//!
//! The cache-aside read and write paths over the cache, store and shard router.

mod cache_aside;
mod outcome;

#[cfg(test)]
mod fakes;

pub use cache_aside::CacheAside;
pub use outcome::{FillOutcome, ReadOutcome, WriteOutcome};
