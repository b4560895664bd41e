//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `opsdoc-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `RecordCollector`: Gathering endpoints, components and test runs
//!   - `StatsCollector`: Walking the generated tree
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{Filesystem, RecordCollector, StatsCollector};

#[cfg(test)]
pub use output::{MockFilesystem, MockRecordCollector, MockStatsCollector};
