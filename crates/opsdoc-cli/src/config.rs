//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and converted into the core
//! [`GenerationConfig`], which performs all validation. The core crate never
//! sees this type.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (applied by [`AppConfig::apply_overrides`])
//! 2. Environment variables (`PROJECT_NAME`, `OUTPUT_DIR`, ...; `.env` honoured)
//! 3. Config file passed with `--config` (TOML, same lower-case keys)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Deserializer, Serialize};

use opsdoc_core::domain::{
    DomainError, FailurePolicy, FeatureToggles, GenerationConfig, OutputFormat,
};

use crate::cli::GenerateArgs;

pub const DEFAULT_PROJECT_NAME: &str = "Permission-aware RAG System";

/// Flat configuration record; keys match the environment variable names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub project_name: String,
    pub project_version: String,
    pub output_dir: String,
    pub generate_api_docs: bool,
    pub generate_architecture: bool,
    pub generate_test_reports: bool,
    pub generate_operational_guides: bool,
    pub include_code_examples: bool,
    pub include_screenshots: bool,
    #[serde(deserialize_with = "list_or_csv")]
    pub output_formats: Vec<String>,
    #[serde(default)]
    pub failure_policy: Option<String>,
    #[serde(default)]
    pub task_timeout_secs: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            project_name: DEFAULT_PROJECT_NAME.into(),
            project_version: "1.0.0".into(),
            output_dir: "generated-docs".into(),
            generate_api_docs: true,
            generate_architecture: true,
            generate_test_reports: true,
            generate_operational_guides: true,
            include_code_examples: true,
            include_screenshots: false,
            output_formats: vec!["markdown".into(), "html".into()],
            failure_policy: None,
            task_timeout_secs: None,
        }
    }
}

impl AppConfig {
    /// Layer defaults, the optional TOML file and the process environment.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        Self::load_from(config_file.map(PathBuf::as_path), Environment::default())
    }

    /// [`Self::load`] with an explicit environment source (tests inject one).
    pub fn load_from(config_file: Option<&Path>, env: Environment) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("project_name", defaults.project_name)?
            .set_default("project_version", defaults.project_version)?
            .set_default("output_dir", defaults.output_dir)?
            .set_default("generate_api_docs", defaults.generate_api_docs)?
            .set_default("generate_architecture", defaults.generate_architecture)?
            .set_default("generate_test_reports", defaults.generate_test_reports)?
            .set_default(
                "generate_operational_guides",
                defaults.generate_operational_guides,
            )?
            .set_default("include_code_examples", defaults.include_code_examples)?
            .set_default("include_screenshots", defaults.include_screenshots)?
            .set_default("output_formats", defaults.output_formats)?;

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        // Values stay strings so `2.0` or `0755` survive; bool and integer
        // fields are converted from their string form on deserialize.
        let settings = builder
            .add_source(env.try_parsing(false))
            .build()
            .context("failed to assemble configuration")?;

        settings
            .try_deserialize()
            .context("invalid configuration value")
    }

    /// Apply per-invocation flags on top of the loaded layers.
    pub fn apply_overrides(&mut self, args: &GenerateArgs) {
        if let Some(name) = &args.project_name {
            self.project_name = name.clone();
        }
        if let Some(version) = &args.project_version {
            self.project_version = version.clone();
        }
        if let Some(dir) = &args.output_dir {
            self.output_dir = dir.clone();
        }
        if !args.formats.is_empty() {
            self.output_formats = args.formats.iter().map(|f| f.as_str().to_string()).collect();
        }
        if let Some(policy) = args.failure_policy {
            self.failure_policy = Some(policy.as_str().to_string());
        }
        if args.timeout_secs.is_some() {
            self.task_timeout_secs = args.timeout_secs;
        }
    }

    /// Convert into the validated core config.
    ///
    /// # Errors
    ///
    /// Any [`DomainError`] from parsing formats or the failure policy, or
    /// from `GenerationConfig::build` validation.
    pub fn to_generation_config(&self) -> Result<GenerationConfig, DomainError> {
        let formats = self
            .output_formats
            .iter()
            .map(|f| f.parse::<OutputFormat>())
            .collect::<Result<Vec<_>, _>>()?;
        let failure_policy = self
            .failure_policy
            .as_deref()
            .map(str::parse::<FailurePolicy>)
            .transpose()?;

        GenerationConfig::builder()
            .project_name(&self.project_name)
            .version(&self.project_version)
            .output_directory(&self.output_dir)
            .formats(formats)
            .features(FeatureToggles {
                api_docs: self.generate_api_docs,
                architecture_diagrams: self.generate_architecture,
                test_reports: self.generate_test_reports,
                operational_guides: self.generate_operational_guides,
                include_code_examples: self.include_code_examples,
                include_screenshots: self.include_screenshots,
            })
            .failure_policy(failure_policy)
            .task_timeout(self.task_timeout_secs.map(Duration::from_secs))
            .build()
    }
}

/// A list (defaults, TOML) or a comma-separated string (environment).
fn list_or_csv<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ListOrCsv {
        List(Vec<String>),
        Csv(String),
    }

    Ok(match ListOrCsv::deserialize(deserializer)? {
        ListOrCsv::List(list) => list,
        ListOrCsv::Csv(csv) => csv
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Environment::default().source(Some(map))
    }

    #[test]
    fn defaults_convert_to_valid_core_config() {
        let cfg = AppConfig::load_from(None, env(&[])).unwrap();
        assert_eq!(cfg, AppConfig::default());

        let core = cfg.to_generation_config().unwrap();
        assert_eq!(core.project_name(), DEFAULT_PROJECT_NAME);
        assert_eq!(core.formats(), [OutputFormat::Markdown, OutputFormat::Html]);
        assert_eq!(core.failure_policy(), None);
    }

    #[test]
    fn environment_overrides_defaults() {
        let cfg = AppConfig::load_from(
            None,
            env(&[
                ("PROJECT_NAME", "Billing API"),
                ("OUTPUT_DIR", "site"),
                ("GENERATE_TEST_REPORTS", "false"),
                ("OUTPUT_FORMATS", "markdown, json"),
                ("FAILURE_POLICY", "tolerate"),
                ("TASK_TIMEOUT_SECS", "12"),
            ]),
        )
        .unwrap();

        assert_eq!(cfg.project_name, "Billing API");
        assert_eq!(cfg.output_dir, "site");
        assert!(!cfg.generate_test_reports);
        assert_eq!(cfg.output_formats, ["markdown", "json"]);

        let core = cfg.to_generation_config().unwrap();
        assert_eq!(core.failure_policy(), Some(FailurePolicy::TolerateAndReport));
        assert_eq!(core.task_timeout(), Some(Duration::from_secs(12)));
    }

    #[test]
    fn numeric_looking_strings_are_kept_verbatim() {
        let cfg = AppConfig::load_from(
            None,
            env(&[
                ("PROJECT_VERSION", "2.0"),
                ("OUTPUT_DIR", "0755"),
                ("PROJECT_NAME", "2024"),
            ]),
        )
        .unwrap();

        assert_eq!(cfg.project_version, "2.0");
        assert_eq!(cfg.output_dir, "0755");
        assert_eq!(cfg.project_name, "2024");
        assert_eq!(cfg.to_generation_config().unwrap().version(), "2.0");
    }

    #[test]
    fn single_format_from_environment_and_list_from_file() {
        let cfg = AppConfig::load_from(None, env(&[("OUTPUT_FORMATS", "html")])).unwrap();
        assert_eq!(cfg.output_formats, ["html"]);

        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "output_formats = [\"json\", \"markdown\"]").unwrap();
        let cfg = AppConfig::load_from(Some(file.path()), env(&[])).unwrap();
        assert_eq!(cfg.output_formats, ["json", "markdown"]);
    }

    #[test]
    fn file_sits_between_defaults_and_environment() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "project_name = \"From File\"\noutput_dir = \"file-docs\"").unwrap();

        let cfg =
            AppConfig::load_from(Some(file.path()), env(&[("OUTPUT_DIR", "env-docs")])).unwrap();

        assert_eq!(cfg.project_name, "From File");
        assert_eq!(cfg.output_dir, "env-docs");
    }

    #[test]
    fn missing_config_file_is_an_error() {
        assert!(AppConfig::load_from(Some(Path::new("/definitely/not/here.toml")), env(&[])).is_err());
    }

    #[test]
    fn unknown_format_is_rejected_by_core() {
        let cfg = AppConfig {
            output_formats: vec!["pdf".into()],
            ..AppConfig::default()
        };
        assert!(matches!(
            cfg.to_generation_config(),
            Err(DomainError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn flags_override_everything() {
        let mut cfg = AppConfig::default();
        cfg.apply_overrides(&GenerateArgs {
            project_name: Some("Flag Name".into()),
            output_dir: Some("flag-docs".into()),
            formats: vec![crate::cli::FormatArg::Json],
            ..GenerateArgs::default()
        });

        assert_eq!(cfg.project_name, "Flag Name");
        assert_eq!(cfg.output_dir, "flag-docs");
        assert_eq!(cfg.output_formats, ["json"]);
    }
}
