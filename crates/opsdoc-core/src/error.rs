//! Unified error handling for opsdoc core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with a closed [`ErrorKind`] for exhaustive matching and
//! user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for opsdoc core operations.
#[derive(Debug, Error, Clone)]
pub enum OpsdocError {
    /// Errors from the domain layer (configuration and sandbox violations).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (I/O, tasks, rendering).
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

/// Closed classification of every error the core can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ConfigValidation,
    Security,
    Io,
    AggregateTask,
    Task,
    Render,
}

impl OpsdocError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(e) if e.is_security() => ErrorKind::Security,
            Self::Domain(_) => ErrorKind::ConfigValidation,
            Self::Application(e) => match e {
                ApplicationError::Io { .. } => ErrorKind::Io,
                ApplicationError::AggregateTask { .. } => ErrorKind::AggregateTask,
                ApplicationError::TaskTimedOut { .. }
                | ApplicationError::TaskCancelled
                | ApplicationError::TaskPanicked { .. } => ErrorKind::Task,
                ApplicationError::Render { .. } => ErrorKind::Render,
            },
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Security => ErrorCategory::Security,
            },
            Self::Application(e) => e.category(),
        }
    }

    /// Errors raised before generation started (nothing was written).
    pub fn is_pre_generation(&self) -> bool {
        matches!(self.kind(), ErrorKind::ConfigValidation | ErrorKind::Security)
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Security,
    Io,
    Task,
    Internal,
}

/// Convenient result type alias.
pub type OpsdocResult<T> = Result<T, OpsdocError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::error::TaskFailure;
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn kind_covers_every_layer() {
        let cases: Vec<(OpsdocError, ErrorKind)> = vec![
            (DomainError::NoFormats.into(), ErrorKind::ConfigValidation),
            (
                DomainError::Security {
                    path: "../x".into(),
                    violation: crate::domain::SecurityViolation::EscapesRoot,
                }
                .into(),
                ErrorKind::Security,
            ),
            (
                ApplicationError::Io {
                    path: PathBuf::from("api/README.md"),
                    operation: "write",
                    reason: "disk full".into(),
                }
                .into(),
                ErrorKind::Io,
            ),
            (
                ApplicationError::AggregateTask {
                    stage: "api".into(),
                    failures: vec![],
                }
                .into(),
                ErrorKind::AggregateTask,
            ),
            (
                ApplicationError::TaskTimedOut {
                    timeout: Duration::from_secs(1),
                }
                .into(),
                ErrorKind::Task,
            ),
            (ApplicationError::TaskCancelled.into(), ErrorKind::Task),
            (
                ApplicationError::Render {
                    artifact: "api/openapi.json".into(),
                    reason: "bad".into(),
                }
                .into(),
                ErrorKind::Render,
            ),
        ];

        for (err, kind) in cases {
            assert_eq!(err.kind(), kind, "{err}");
        }
    }

    #[test]
    fn pre_generation_errors() {
        assert!(OpsdocError::from(DomainError::NoFormats).is_pre_generation());
        assert!(!OpsdocError::from(ApplicationError::TaskCancelled).is_pre_generation());
    }

    #[test]
    fn aggregate_message_names_every_failure() {
        let err = OpsdocError::from(ApplicationError::AggregateTask {
            stage: "api".into(),
            failures: vec![
                TaskFailure::new("api/openapi.json", ApplicationError::TaskCancelled.into()),
                TaskFailure::new(
                    "api/README.md",
                    ApplicationError::TaskPanicked {
                        message: "boom".into(),
                    }
                    .into(),
                ),
            ],
        });

        let message = err.to_string();
        assert!(message.contains("api/openapi.json"));
        assert!(message.contains("api/README.md"));
        assert!(message.contains("boom"));
    }
}
