//! Implementation of `opsdoc stats <DIR>`.

use tracing::instrument;

use opsdoc_adapters::WalkdirStatsCollector;
use opsdoc_core::application::ports::StatsCollector;

use crate::{cli::StatsArgs, error::CliResult, output::OutputManager};

/// Walk `args.directory` and print the summary. A missing directory prints
/// zero counts.
#[instrument(skip_all, fields(dir = %args.directory.display()))]
pub async fn execute(args: StatsArgs, output: &OutputManager) -> CliResult<()> {
    let stats = WalkdirStatsCollector::new().walk(&args.directory).await?;

    output.header(&format!("Statistics for {}", args.directory.display()))?;
    output.stats(&stats)?;
    Ok(())
}
