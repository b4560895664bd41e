//! Error handling for the opsdoc CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Exit code mapping

use std::error::Error;

use owo_colors::OwoColorize;
use thiserror::Error;

use opsdoc_core::domain::DomainError;
use opsdoc_core::error::{ErrorCategory as CoreCategory, OpsdocError};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// A flag value the parser accepted but the command cannot use.
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration layers could not be read or merged.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Wrapped so suggestions can come from the core error's category
    /// without the CLI knowing its internals.
    #[error("Generation failed: {0}")]
    Core(#[from] OpsdocError),

    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Interrupted (Ctrl-C); in-flight tasks settled, the rest were skipped.
    #[error("Operation cancelled")]
    Cancelled,
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<DomainError> for CliError {
    fn from(err: DomainError) -> Self {
        CliError::Core(err.into())
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message, .. } => vec![
                format!("Check your input: {message}"),
                "Use --help for usage information".into(),
            ],

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {message}"),
                "Check the file passed with --config (TOML, lower-case keys)".into(),
                "Check PROJECT_NAME, OUTPUT_DIR, OUTPUT_FORMATS and related variables".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {message}"),
                "Check file permissions".into(),
                "Check available disk space".into(),
            ],

            Self::Cancelled => vec![
                "Generation was interrupted".into(),
                "Files written before the interrupt were kept".into(),
            ],
        }
    }

    /// Get the error category for styling and logging.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation | CoreCategory::Security => ErrorCategory::UserError,
                CoreCategory::Io | CoreCategory::Task | CoreCategory::Internal => {
                    ErrorCategory::Internal
                }
            },
            Self::IoError { .. } => ErrorCategory::Internal,
            Self::Cancelled => ErrorCategory::UserError,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Error                                   | Code |
    /// |-----------------------------------------|------|
    /// | Invalid flag value                      |  2   |
    /// | Everything else (config, abort, I/O...) |  1   |
    ///
    /// clap parse failures exit with 2 before a `CliError` exists.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidInput { .. } => 2,
            _ => 1,
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}\n\n",
            "✗".red().bold(),
            "Error:".red().bold()
        ));
        output.push_str(&format!("  {}\n", self.to_string().red()));

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "→".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {suggestion}\n"));
            }
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(), // ℹ
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`], without ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("\nError: {self}\n"));

        if verbose {
            let mut src = self.source();
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad input: flags, project name, output directory.
    UserError,
    Configuration,
    /// I/O and task failures.
    Internal,
}

// ── IntoCli trait ─────────────────────────────────────────────────────────────

/// Convert foreign error types into [`CliError`] at call-sites with a
/// descriptive context message.
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

impl<T> IntoCli<T> for anyhow::Result<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::ConfigError {
            message: format!("{}: {e:#}", f().into()),
            source: Some(e.into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    use opsdoc_core::application::{ApplicationError, TaskFailure};
    use opsdoc_core::domain::SecurityViolation;

    fn aggregate() -> OpsdocError {
        ApplicationError::AggregateTask {
            stage: "api".into(),
            failures: vec![TaskFailure::new(
                "api/openapi.json",
                ApplicationError::Io {
                    path: PathBuf::from("api/openapi.json"),
                    operation: "write",
                    reason: "disk full".into(),
                }
                .into(),
            )],
        }
        .into()
    }

    #[test]
    fn aggregate_failure_exits_one_and_names_the_task() {
        let err = CliError::from(aggregate());
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.category(), ErrorCategory::Internal);
        assert!(err.to_string().contains("api/openapi.json"));
    }

    #[test]
    fn security_error_is_a_user_error_with_exit_one() {
        let err = CliError::from(DomainError::Security {
            path: "../evil".into(),
            violation: SecurityViolation::EscapesRoot,
        });
        assert_eq!(err.category(), ErrorCategory::UserError);
        assert_eq!(err.exit_code(), 1);
        assert!(!err.suggestions().is_empty());
    }

    #[test]
    fn invalid_input_exits_two() {
        let err = CliError::InvalidInput {
            message: "x".into(),
            source: None,
        };
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn config_error_suggests_env_vars() {
        let err = CliError::ConfigError {
            message: "bad".into(),
            source: None,
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.suggestions().iter().any(|s| s.contains("OUTPUT_DIR")));
    }

    #[test]
    fn format_plain_contains_error_header() {
        let s = CliError::Cancelled.format_plain(false);
        assert!(s.contains("Error: Operation cancelled"));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("--verbose"));
    }

    #[test]
    fn format_plain_verbose_shows_cause_and_omits_hint() {
        let err: CliResult<()> =
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied")).with_cli_context(|| "walking output");
        let s = err.unwrap_err().format_plain(true);
        assert!(s.contains("Caused by: denied"));
        assert!(!s.contains("--verbose"));
    }

    #[test]
    fn anyhow_errors_become_config_errors() {
        let result: anyhow::Result<()> = Err(anyhow::anyhow!("missing key"));
        let cli = result.with_cli_context(|| "loading configuration");
        assert!(matches!(cli, Err(CliError::ConfigError { .. })));
    }
}
