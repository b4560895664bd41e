//! Console output for the generation summary.

use std::io::{self, IsTerminal};
use std::time::Duration;

use console::Term;
use owo_colors::OwoColorize;

use opsdoc_core::application::{BatchReport, GenerationResult, GenerationStats};

use crate::cli::global::{GlobalArgs, OutputFormat};

/// Manages CLI output based on flags and terminal detection.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    pub fn new(args: &GlobalArgs) -> Self {
        // Auto → Human (TTY) or Plain (piped/redirected).
        let resolved_format = if args.output_format == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            args.output_format
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color || resolved_format == OutputFormat::Plain,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Error indicator: `✗ <msg>`.  *Not* suppressed in quiet mode.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        let line = if self.no_color {
            format!("\u{2717} {msg}") // ✗
        } else {
            format!("{} {}", "\u{2717}".red().bold(), msg.red())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    // ── Report sections ────────────────────────────────────────────────────

    /// One line per task of a settled batch. Failures print even when quiet.
    pub fn batch(&self, batch: &BatchReport) -> io::Result<()> {
        self.header(&format!(
            "{} ({}/{} ok)",
            batch.stage,
            batch.succeeded(),
            batch.results.len()
        ))?;
        for result in &batch.results {
            if result.success() {
                self.success(&result_line(result))?;
            } else {
                self.error(&result_line(result))?;
            }
        }
        Ok(())
    }

    pub fn stats(&self, stats: &GenerationStats) -> io::Result<()> {
        for line in stats_lines(stats) {
            self.print(&line)?;
        }
        Ok(())
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }
}

/// `  tests/README.md  (1.2 KB, 3ms)` or `  api/openapi.json: <error>`.
fn result_line(result: &GenerationResult) -> String {
    match result.error() {
        None => format!(
            "{}  ({}, {})",
            result.name(),
            human_size(result.size()),
            human_duration(result.duration())
        ),
        Some(err) => format!("{}: {err}", result.name()),
    }
}

fn stats_lines(stats: &GenerationStats) -> Vec<String> {
    let mut lines = vec![
        format!("Total files: {}", stats.total_files),
        format!("Total size:  {:.1} KB", stats.total_size_kb()),
    ];
    if !stats.files_by_type.is_empty() {
        lines.push("By type:".into());
        for (ext, count) in &stats.files_by_type {
            let ext = if ext.is_empty() { "(none)" } else { ext.as_str() };
            lines.push(format!("  {ext:<8} {count}"));
        }
    }
    lines
}

fn human_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    }
}

fn human_duration(duration: Duration) -> String {
    format!("{}ms", duration.as_millis())
}

// ── tests ─────────────────────────────────────────────────────────────────────
