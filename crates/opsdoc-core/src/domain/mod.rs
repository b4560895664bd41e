// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for opsdoc.
//!
//! Pure data and rules: the records that get documented, the generation
//! configuration, and the path sandbox. All I/O, rendering and scheduling
//! live in the application layer and behind ports.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: Paths are validated lexically, never touched
//! - **Immutable values**: configuration and policies are frozen on build
pub mod config;
pub mod entities;
pub mod error;
pub mod sandbox;
pub mod validation;
pub mod value_objects;

pub use config::{FeatureToggles, GenerationConfig, GenerationConfigBuilder};
pub use entities::{
    ApiEndpoint, ApiParameter, ApiRequestBody, ApiResponse, ArchitectureComponent, FileMode,
    Permissions, RecordSet, TestReport, TestSuiteReport, TestSummary, display_value,
};
pub use error::{DomainError, ErrorCategory};
pub use sandbox::{ForbiddenPattern, PathSandbox, SandboxPolicy, SecurityViolation};
pub use validation::DomainValidator;
pub use value_objects::{ComponentType, FailurePolicy, HttpMethod, OutputFormat, ParameterLocation};
