//! `GenerationConfig`, the validated and immutable description of one
//! generation run, and its builder.
//!
//! The builder is the only way in. `build()` runs every check in
//! [`DomainValidator`], so a `GenerationConfig` that exists is valid.
//! Path safety of `output_directory` is not decided here: the pipeline
//! resolves it through the sandbox before touching the filesystem.

use std::fmt;
use std::time::Duration;

use crate::domain::{
    error::DomainError,
    validation::DomainValidator,
    value_objects::{FailurePolicy, OutputFormat},
};

// ── Feature toggles ──────────────────────────────────────────────────────────

/// Which documentation families to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureToggles {
    pub api_docs: bool,
    pub architecture_diagrams: bool,
    pub test_reports: bool,
    pub operational_guides: bool,
    pub include_code_examples: bool,
    pub include_screenshots: bool,
}

impl Default for FeatureToggles {
    fn default() -> Self {
        Self {
            api_docs: true,
            architecture_diagrams: true,
            test_reports: true,
            operational_guides: true,
            include_code_examples: true,
            include_screenshots: false,
        }
    }
}

// ── Aggregate ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    project_name: String,
    version: String,
    output_directory: String,
    formats: Vec<OutputFormat>,
    features: FeatureToggles,
    failure_policy: Option<FailurePolicy>,
    task_timeout: Option<Duration>,
}

impl GenerationConfig {
    pub fn builder() -> GenerationConfigBuilder {
        GenerationConfigBuilder::new()
    }

    /// Project name, already trimmed.
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Output directory as configured, relative to the project root.
    pub fn output_directory(&self) -> &str {
        &self.output_directory
    }

    pub fn formats(&self) -> &[OutputFormat] {
        &self.formats
    }

    pub fn has_format(&self, format: OutputFormat) -> bool {
        self.formats.contains(&format)
    }

    pub const fn features(&self) -> FeatureToggles {
        self.features
    }

    /// Policy applied to every stage instead of the stage default.
    pub const fn failure_policy(&self) -> Option<FailurePolicy> {
        self.failure_policy
    }

    pub const fn task_timeout(&self) -> Option<Duration> {
        self.task_timeout
    }

    /// Re-check every invariant.
    pub fn validate(&self) -> Result<(), DomainError> {
        DomainValidator::validate_project_name(&self.project_name)?;
        DomainValidator::validate_version(&self.version)?;
        DomainValidator::validate_output_directory(&self.output_directory)?;
        DomainValidator::validate_formats(&self.formats)
    }
}

impl fmt::Display for GenerationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formats: Vec<_> = self.formats.iter().map(OutputFormat::as_str).collect();
        write!(
            f,
            "{} v{} -> {} [{}]",
            self.project_name,
            self.version,
            self.output_directory,
            formats.join(",")
        )
    }
}

// ── Builder ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct GenerationConfigBuilder {
    project_name: Option<String>,
    version: Option<String>,
    output_directory: Option<String>,
    formats: Vec<OutputFormat>,
    features: FeatureToggles,
    failure_policy: Option<FailurePolicy>,
    task_timeout: Option<Duration>,
}

impl GenerationConfigBuilder {
    pub const DEFAULT_VERSION: &'static str = "1.0.0";
    pub const DEFAULT_OUTPUT_DIRECTORY: &'static str = "generated-docs";

    pub fn new() -> Self {
        Self {
            project_name: None,
            version: None,
            output_directory: None,
            formats: vec![OutputFormat::Markdown, OutputFormat::Html],
            features: FeatureToggles::default(),
            failure_policy: None,
            task_timeout: None,
        }
    }

    pub fn project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = Some(name.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn output_directory(mut self, dir: impl Into<String>) -> Self {
        self.output_directory = Some(dir.into());
        self
    }

    /// Replace the format list. Duplicates are dropped, order is kept.
    pub fn formats(mut self, formats: impl IntoIterator<Item = OutputFormat>) -> Self {
        self.formats.clear();
        for format in formats {
            if !self.formats.contains(&format) {
                self.formats.push(format);
            }
        }
        self
    }

    pub fn features(mut self, features: FeatureToggles) -> Self {
        self.features = features;
        self
    }

    pub fn failure_policy(mut self, policy: Option<FailurePolicy>) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn task_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.task_timeout = timeout;
        self
    }

    /// Validate and freeze.
    ///
    /// # Errors
    ///
    /// `MissingRequiredField` when no project name was given, otherwise the
    /// first failing check of [`DomainValidator`].
    pub fn build(self) -> Result<GenerationConfig, DomainError> {
        let project_name = self
            .project_name
            .ok_or(DomainError::MissingRequiredField {
                field: "project_name",
            })?
            .trim()
            .to_string();

        let config = GenerationConfig {
            project_name,
            version: self
                .version
                .unwrap_or_else(|| Self::DEFAULT_VERSION.to_string())
                .trim()
                .to_string(),
            output_directory: self
                .output_directory
                .unwrap_or_else(|| Self::DEFAULT_OUTPUT_DIRECTORY.to_string()),
            formats: self.formats,
            features: self.features,
            failure_policy: self.failure_policy,
            task_timeout: self.task_timeout,
        };

        config.validate()?;
        Ok(config)
    }
}

impl Default for GenerationConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> GenerationConfigBuilder {
        GenerationConfig::builder().project_name("Permission-aware RAG System")
    }

    #[test]
    fn defaults_fill_optional_fields() {
        let config = base().build().unwrap();

        assert_eq!(config.version(), "1.0.0");
        assert_eq!(config.output_directory(), "generated-docs");
        assert_eq!(config.formats(), &[OutputFormat::Markdown, OutputFormat::Html]);
        assert!(config.features().api_docs);
        assert!(!config.features().include_screenshots);
        assert_eq!(config.failure_policy(), None);
    }

    #[test]
    fn project_name_is_trimmed() {
        let config = GenerationConfig::builder()
            .project_name("  Docs Portal  ")
            .build()
            .unwrap();
        assert_eq!(config.project_name(), "Docs Portal");
    }

    #[test]
    fn missing_project_name_is_rejected() {
        let err = GenerationConfig::builder().build().unwrap_err();
        assert!(matches!(err, DomainError::MissingRequiredField { .. }));
    }

    #[test]
    fn empty_format_list_is_rejected() {
        let err = base().formats([]).build().unwrap_err();
        assert_eq!(err, DomainError::NoFormats);
    }

    #[test]
    fn duplicate_formats_collapse() {
        let config = base()
            .formats([OutputFormat::Json, OutputFormat::Json, OutputFormat::Markdown])
            .build()
            .unwrap();
        assert_eq!(config.formats(), &[OutputFormat::Json, OutputFormat::Markdown]);
        assert!(config.has_format(OutputFormat::Json));
        assert!(!config.has_format(OutputFormat::Html));
    }

    #[test]
    fn blank_output_directory_is_rejected() {
        let err = base().output_directory("  ").build().unwrap_err();
        assert!(matches!(err, DomainError::InvalidOutputDirectory { .. }));
    }

    #[test]
    fn traversal_output_directory_passes_config_validation() {
        // Rejected later by the sandbox, before any directory is created.
        assert!(base().output_directory("../evil").build().is_ok());
    }

    #[test]
    fn display_is_one_line_summary() {
        let config = base().build().unwrap();
        assert_eq!(
            config.to_string(),
            "Permission-aware RAG System v1.0.0 -> generated-docs [markdown,html]"
        );
    }
}
