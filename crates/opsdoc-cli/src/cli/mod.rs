//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name     = "opsdoc",
    bin_name = "opsdoc",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Operator documentation generator",
    long_about = "opsdoc writes API reference (Markdown, HTML, OpenAPI), \
                  architecture diagrams, test history and operational \
                  runbooks for a project into one output tree.",
    after_help = "EXAMPLES:\n\
        \x20 opsdoc\n\
        \x20 opsdoc generate --output-dir site-docs --format markdown\n\
        \x20 PROJECT_NAME='Billing API' opsdoc generate --failure-policy tolerate\n\
        \x20 opsdoc stats generated-docs",
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute; `generate` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// The requested command, defaulting to `generate` with no overrides.
    pub fn command_or_default(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Generate(GenerateArgs::default()))
    }
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Generate the documentation tree.
    #[command(
        visible_alias = "gen",
        about = "Generate documentation (default)",
        after_help = "EXAMPLES:\n\
            \x20 opsdoc generate\n\
            \x20 opsdoc generate --project-root ../service --output-dir docs\n\
            \x20 opsdoc generate --format markdown --format html --timeout 30"
    )]
    Generate(GenerateArgs),

    /// Summarize an existing output tree.
    #[command(
        about = "Print file statistics for a directory",
        after_help = "EXAMPLES:\n\
            \x20 opsdoc stats generated-docs"
    )]
    Stats(StatsArgs),
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `opsdoc generate`. Each flag overrides the layered config.
#[derive(Debug, Clone, Default, Args)]
pub struct GenerateArgs {
    /// Directory scanned for sources; output is resolved below it.
    #[arg(
        long = "project-root",
        value_name = "DIR",
        help = "Project root (default: current directory)"
    )]
    pub project_root: Option<PathBuf>,

    #[arg(
        short = 'n',
        long = "project-name",
        value_name = "NAME",
        help = "Project name shown in every document"
    )]
    pub project_name: Option<String>,

    #[arg(long = "project-version", value_name = "VERSION", help = "Version string")]
    pub project_version: Option<String>,

    /// Relative to the project root; may not escape it.
    #[arg(
        short = 'o',
        long = "output-dir",
        value_name = "DIR",
        help = "Output directory relative to the project root"
    )]
    pub output_dir: Option<String>,

    #[arg(
        short = 'f',
        long = "format",
        value_name = "FORMAT",
        value_enum,
        help = "Output format (repeatable)"
    )]
    pub formats: Vec<FormatArg>,

    #[arg(
        long = "failure-policy",
        value_name = "POLICY",
        value_enum,
        help = "Override every stage's failure policy"
    )]
    pub failure_policy: Option<PolicyArg>,

    #[arg(
        long = "timeout",
        value_name = "SECS",
        help = "Per-task timeout in seconds"
    )]
    pub timeout_secs: Option<u64>,

    /// Omit `Generated:` lines so repeated runs are byte-identical.
    #[arg(long = "no-timestamps", help = "Omit generation timestamps")]
    pub no_timestamps: bool,
}

/// Arguments for `opsdoc stats`.
#[derive(Debug, Clone, Args)]
pub struct StatsArgs {
    #[arg(value_name = "DIR", help = "Directory to summarize")]
    pub directory: PathBuf,
}

// ── value enums ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    #[value(alias = "md")]
    Markdown,
    Html,
    Json,
}

impl FormatArg {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Html => "html",
            Self::Json => "json",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Fail the run when any task of a batch fails.
    Abort,
    /// Record failures and keep going.
    Tolerate,
}

impl PolicyArg {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Abort => "abort",
            Self::Tolerate => "tolerate",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_defaults_to_generate() {
        let cli = Cli::try_parse_from(["opsdoc"]).unwrap();
        assert!(matches!(cli.command_or_default(), Commands::Generate(args) if args.formats.is_empty()));
    }

    #[test]
    fn generate_flags_parse() {
        let cli = Cli::try_parse_from([
            "opsdoc",
            "generate",
            "-o",
            "docs",
            "--format",
            "md",
            "--format",
            "html",
            "--failure-policy",
            "tolerate",
            "--timeout",
            "5",
        ])
        .unwrap();

        let Commands::Generate(args) = cli.command_or_default() else {
            panic!("expected generate");
        };
        assert_eq!(args.output_dir.as_deref(), Some("docs"));
        assert_eq!(args.formats, [FormatArg::Markdown, FormatArg::Html]);
        assert_eq!(args.failure_policy, Some(PolicyArg::Tolerate));
        assert_eq!(args.timeout_secs, Some(5));
    }

    #[test]
    fn no_color_flag_and_value_forms() {
        assert!(Cli::try_parse_from(["opsdoc", "--no-color"]).unwrap().global.no_color);
        assert!(!Cli::try_parse_from(["opsdoc"]).unwrap().global.no_color);
    }

    #[test]
    fn stats_requires_directory() {
        assert!(Cli::try_parse_from(["opsdoc", "stats"]).is_err());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["opsdoc", "-q", "-v"]).is_err());
    }
}
