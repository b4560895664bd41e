//! opsdoc Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain, application and rendering layers for the
//! opsdoc documentation generator, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            opsdoc-cli (CLI)             │
//! │       (config, logging, exit codes)     │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         DocumentationService            │
//! │   Pipeline → stages → TaskOrchestrator  │
//! │      tasks: render → DocumentWriter     │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │ Filesystem, RecordCollector, StatsColl. │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     opsdoc-adapters (Infrastructure)    │
//! │  LocalFilesystem, ProjectCollector, ... │
//! └─────────────────────────────────────────┘
//!
//!    domain: records, config, PathSandbox     render: pure text builders
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use opsdoc_core::prelude::*;
//!
//! let config = GenerationConfig::builder()
//!     .project_name("Permission-aware RAG System")
//!     .output_directory("generated-docs")
//!     .build()?;
//!
//! let service = DocumentationService::new(
//!     Arc::new(collector),  // impl RecordCollector
//!     Arc::new(filesystem), // impl Filesystem
//!     Arc::new(stats),      // impl StatsCollector
//!     std::env::current_dir()?,
//! );
//! let report = service.generate(&config).await?;
//! println!("{} files", report.stats.total_files);
//! ```

pub mod domain;

pub mod application;

pub mod render;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        BatchReport, BatchState, CancellationFlag, DocumentWriter, DocumentationService,
        GenerationReport, GenerationResult, GenerationStage, GenerationStats, GenerationTask,
        Pipeline, StageContext, TaskOrchestrator, WriterPolicy,
        ports::{Filesystem, RecordCollector, StatsCollector},
    };
    pub use crate::domain::{
        ApiEndpoint, ApiParameter, ApiRequestBody, ApiResponse, ArchitectureComponent,
        ComponentType, FailurePolicy, FeatureToggles, FileMode, GenerationConfig, HttpMethod,
        OutputFormat, ParameterLocation, PathSandbox, RecordSet, SandboxPolicy, TestReport,
        TestSuiteReport, TestSummary,
    };
    pub use crate::error::{ErrorCategory, ErrorKind, OpsdocError, OpsdocResult};
    pub use crate::render::RenderContext;
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
