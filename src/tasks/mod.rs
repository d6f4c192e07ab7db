//! Background Tasks Module
//!
//! Process-scoped tasks; nothing here is tied to a single request.
//!
//! # Tasks
//! - TTL Cleanup: Removes expired cache entries at configured intervals

mod cleanup;

pub use cleanup::spawn_cleanup_task;
