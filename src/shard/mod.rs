//! Shard Module
//!
//! Maps keys to backing store partitions.

mod router;


pub use router::{fnv1a_32, ModuloRouter, ShardRouter};
