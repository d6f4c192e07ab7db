//! Store Module
//!
//! The partitioned backing store the coordinator treats as the source of truth.

mod memory;
mod port;

pub use memory::ShardedMemoryStore;
pub use port::StorePort;
