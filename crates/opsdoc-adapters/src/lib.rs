//! Infrastructure adapters for opsdoc.
//!
//! This crate implements the ports defined in `opsdoc-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin_records;
pub mod collector;
pub mod filesystem;
pub mod stats;

// Re-export commonly used adapters
pub use collector::ProjectCollector;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use stats::WalkdirStatsCollector;
