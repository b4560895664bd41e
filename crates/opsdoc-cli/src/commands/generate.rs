//! Implementation of `opsdoc generate` (also the default command).
//!
//! Dispatch sequence:
//! 1. Layer configuration (defaults → file → env → flags) and validate it
//! 2. Wire the local adapters into `DocumentationService`
//! 3. Run the pipeline with Ctrl-C wired to the cancellation flag
//! 4. Print one line per artifact and the output statistics

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use opsdoc_adapters::{LocalFilesystem, ProjectCollector, WalkdirStatsCollector};
use opsdoc_core::{
    application::{CancellationFlag, DocumentationService, GenerationReport},
    domain::GenerationConfig,
};

use crate::{
    cli::{GenerateArgs, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

#[instrument(skip_all)]
pub async fn execute(args: GenerateArgs, global: &GlobalArgs, output: &OutputManager) -> CliResult<()> {
    let config = resolve_config(&args, global)?;
    let project_root = match &args.project_root {
        Some(root) => root.clone(),
        None => std::env::current_dir().with_cli_context(|| "reading current directory")?,
    };
    debug!(root = %project_root.display(), "Project root");

    let cancellation = CancellationFlag::new();
    watch_interrupt(cancellation.clone());

    let service = build_service(&project_root, cancellation.clone(), !args.no_timestamps);
    let output_root = service.output_root(&config)?;

    output.header(&format!("Generating documentation for {}", config.project_name()))?;
    output.info(&format!("Output: {}", output_root.display()))?;

    let report = service.generate(&config).await?;
    print_report(&report, output)?;

    if cancellation.is_cancelled() {
        return Err(CliError::Cancelled);
    }

    let failed = report.failures().count();
    if failed > 0 {
        warn!(failed, "Generation finished with tolerated failures");
        output.warning(&format!(
            "{failed} artifact(s) failed; the rest of the tree was written"
        ))?;
    } else {
        output.success(&format!(
            "Documentation written to {}",
            output_root.display()
        ))?;
    }

    info!(files = report.stats.total_files, "Generate command finished");
    Ok(())
}

/// Layer the configuration and apply this invocation's flags.
pub fn resolve_config(args: &GenerateArgs, global: &GlobalArgs) -> CliResult<GenerationConfig> {
    let mut app = AppConfig::load(global.config.as_ref())
        .with_cli_context(|| "loading configuration")?;
    app.apply_overrides(args);
    debug!(?app, "Configuration resolved");

    Ok(app.to_generation_config()?)
}

fn build_service(
    project_root: &Path,
    cancellation: CancellationFlag,
    timestamps: bool,
) -> DocumentationService {
    DocumentationService::new(
        Arc::new(ProjectCollector::new(project_root)),
        Arc::new(LocalFilesystem::new()),
        Arc::new(WalkdirStatsCollector::new()),
        project_root,
    )
    .with_cancellation(cancellation)
    .with_timestamps(timestamps)
}

/// Set the flag on the first Ctrl-C; tasks already running still settle.
fn watch_interrupt(flag: CancellationFlag) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling pending tasks");
            flag.cancel();
        }
    });
}

fn print_report(report: &GenerationReport, output: &OutputManager) -> CliResult<()> {
    for batch in &report.batches {
        output.batch(batch)?;
    }
    output.print("")?;
    output.header("Output statistics")?;
    output.stats(&report.stats)?;
    Ok(())
}
