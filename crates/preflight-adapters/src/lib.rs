//! Infrastructure adapters for Preflight.
//!
//! This crate implements the ports defined in `preflight-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod memory;
pub mod snapshot_loader;

// Re-export commonly used adapters
pub use memory::{CloudSnapshot, MemoryCloud};
pub use snapshot_loader::{SnapshotError, SnapshotLoader};
