//! Application layer for opsdoc.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (`DocumentationService`)
//! - **Pipeline**: Ordered generation stages, one task batch each
//! - **Orchestrator**: Concurrent task execution under a failure policy
//! - **Writer**: Sandboxed persistence through the `Filesystem` port
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! Business rules (validation, sandboxing) live in `crate::domain`; text
//! layout lives in `crate::render`.

pub mod error;
pub mod orchestrator;
pub mod pipeline;
pub mod ports;
pub mod report;
pub mod services;
pub mod writer;

pub use services::DocumentationService;

pub use orchestrator::{
    BatchState, CancellationFlag, GenerationResult, GenerationTask, TaskOrchestrator,
};
pub use pipeline::{GenerationStage, Pipeline, StageContext};
pub use report::{BatchReport, GenerationReport, GenerationStats};
pub use writer::{DocumentWriter, WriterPolicy};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, RecordCollector, StatsCollector};

pub use error::{ApplicationError, TaskFailure};
