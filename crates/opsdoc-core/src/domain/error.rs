// ============================================================================
// domain/error.rs - VALIDATION AND SANDBOX ERRORS
// ============================================================================

use thiserror::Error;

use crate::domain::sandbox::SecurityViolation;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (results are fanned out to the reporter and the aggregate)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Configuration Errors (raised before any filesystem access)
    // ========================================================================
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("Invalid version '{version}': {reason}")]
    InvalidVersion { version: String, reason: String },

    #[error("Invalid output directory '{path}': {reason}")]
    InvalidOutputDirectory { path: String, reason: String },

    #[error("Unsupported output format '{format}'")]
    UnsupportedFormat { format: String },

    #[error("No output formats configured")]
    NoFormats,

    #[error("Unknown failure policy '{value}'")]
    InvalidFailurePolicy { value: String },

    #[error("Unknown HTTP method '{value}'")]
    InvalidHttpMethod { value: String },

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    // ========================================================================
    // Security Errors (raised by the path sandbox)
    // ========================================================================
    #[error("Rejected path '{path}': {violation}")]
    Security {
        path: String,
        violation: SecurityViolation,
    },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { .. } => vec![
                "Project names must be 3-100 characters long".into(),
                "Use letters, digits, spaces, '-', '_' or Japanese script".into(),
                "Set it with PROJECT_NAME".into(),
            ],
            Self::InvalidOutputDirectory { path, .. } => vec![
                format!("Output directory: {}", path),
                "Use a relative path inside the project, e.g. generated-docs".into(),
                "Set it with OUTPUT_DIR".into(),
            ],
            Self::UnsupportedFormat { format } => vec![
                format!("'{}' is not a supported format", format),
                "Supported formats: markdown, html, json".into(),
                "Example: OUTPUT_FORMATS=markdown,html".into(),
            ],
            Self::NoFormats => vec![
                "At least one output format is required".into(),
                "Example: OUTPUT_FORMATS=markdown".into(),
            ],
            Self::InvalidFailurePolicy { value } => vec![
                format!("'{}' is not a failure policy", value),
                "Use 'abort' or 'tolerate'".into(),
            ],
            Self::Security { violation, .. } => vec![
                format!("The path was rejected because it {}", violation.describe()),
                "Paths must be relative and stay inside the output root".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Security { .. } => ErrorCategory::Security,
            _ => ErrorCategory::Validation,
        }
    }

    /// `true` when this error came from the path sandbox.
    pub fn is_security(&self) -> bool {
        matches!(self, Self::Security { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Security,
}
