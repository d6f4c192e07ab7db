//! Shard Router Module
//!
//! Static hash-modulo routing of keys onto a fixed number of shards.

use crate::error::{KvError, Result};

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

// == Shard Router ==
/// Maps a key to a shard index in `0..shard_count()`.
///
/// Implementations must be pure: the same key always lands on the same shard
/// for the lifetime of the router.
pub trait ShardRouter: Send + Sync {
    /// Returns the shard index for `key`.
    fn shard_for(&self, key: &str) -> usize;

    /// Returns the number of shards this router distributes over.
    fn shard_count(&self) -> usize;
}

/// 32-bit FNV-1a hash of `bytes`.
pub fn fnv1a_32(bytes: &[u8]) -> u32 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u32::from(*byte)).wrapping_mul(FNV_PRIME)
    })
}

// == Modulo Router ==
/// FNV-1a hash of the key bytes reduced modulo the shard count.
///
/// Changing the shard count remaps most keys; there is no resize path.
#[derive(Debug, Clone, Copy)]
pub struct ModuloRouter {
    shards: u32,
}

impl ModuloRouter {
    /// Creates a router over `shards` partitions.
    ///
    /// Returns `InvalidInput` when `shards` is zero or does not fit in a u32.
    pub fn new(shards: usize) -> Result<Self> {
        match u32::try_from(shards) {
            Ok(n) if n > 0 => Ok(Self { shards: n }),
            _ => Err(KvError::InvalidInput(format!(
                "Shard count must be between 1 and {}, got {}",
                u32::MAX,
                shards
            ))),
        }
    }
}

impl ShardRouter for ModuloRouter {
    fn shard_for(&self, key: &str) -> usize {
        (fnv1a_32(key.as_bytes()) % self.shards) as usize
    }

    fn shard_count(&self) -> usize {
        self.shards as usize
    }
}
