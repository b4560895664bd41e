//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not business
//! rules. Rule violations are `DomainError` from `crate::domain`.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::error::{ErrorCategory, OpsdocError};

/// Errors that occur while generating and persisting artifacts.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("I/O error during {operation} of {}: {reason}", path.display())]
    Io {
        path: PathBuf,
        operation: &'static str,
        reason: String,
    },

    /// One or more tasks of an aborting batch failed.
    #[error("{} task(s) failed in stage '{stage}': {}", failures.len(), FailureList(failures))]
    AggregateTask {
        stage: String,
        failures: Vec<TaskFailure>,
    },

    /// A task ran past its deadline.
    #[error("Task timed out after {}ms", timeout.as_millis())]
    TaskTimedOut { timeout: Duration },

    /// A task was never started because the batch was cancelled.
    #[error("Task cancelled before it started")]
    TaskCancelled,

    /// A task panicked.
    #[error("Task panicked: {message}")]
    TaskPanicked { message: String },

    /// An artifact could not be rendered.
    #[error("Failed to render {artifact}: {reason}")]
    Render { artifact: String, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Io { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure there is free disk space".into(),
            ],
            Self::AggregateTask { failures, .. } => {
                let mut suggestions: Vec<String> = failures
                    .iter()
                    .map(|f| format!("{}: {}", f.name, f.error))
                    .collect();
                suggestions.push(
                    "Set FAILURE_POLICY=tolerate to keep going past failed artifacts".into(),
                );
                suggestions
            }
            Self::TaskTimedOut { .. } => vec![
                "Raise TASK_TIMEOUT_SECS or unset it".into(),
            ],
            Self::TaskPanicked { .. } => vec![
                "This is a bug, please report it with the output of -vvv".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Io { .. } => ErrorCategory::Io,
            Self::AggregateTask { .. }
            | Self::TaskTimedOut { .. }
            | Self::TaskCancelled => ErrorCategory::Task,
            Self::TaskPanicked { .. } | Self::Render { .. } => ErrorCategory::Internal,
        }
    }
}

/// A failed task inside an aggregate error.
#[derive(Debug, Clone)]
pub struct TaskFailure {
    pub name: String,
    pub error: Box<OpsdocError>,
}

impl TaskFailure {
    pub fn new(name: impl Into<String>, error: OpsdocError) -> Self {
        Self {
            name: name.into(),
            error: Box::new(error),
        }
    }
}

impl fmt::Display for TaskFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.error)
    }
}

struct FailureList<'a>(&'a [TaskFailure]);

impl fmt::Display for FailureList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{failure}")?;
        }
        Ok(())
    }
}
