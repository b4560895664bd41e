//! Output tree statistics.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, instrument};
use walkdir::WalkDir;

use opsdoc_core::{
    application::{ApplicationError, GenerationStats, ports::StatsCollector},
    error::OpsdocResult,
};

/// Counts files, bytes and extensions below a directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkdirStatsCollector;

impl WalkdirStatsCollector {
    pub fn new() -> Self {
        Self
    }

    /// Blocking walk. A missing directory yields zeroed stats.
    pub fn walk_blocking(directory: &Path) -> OpsdocResult<GenerationStats> {
        let mut stats = GenerationStats::default();
        if !directory.exists() {
            debug!(dir = %directory.display(), "nothing to walk");
            return Ok(stats);
        }

        for entry in WalkDir::new(directory).min_depth(1) {
            let entry = entry.map_err(|e| ApplicationError::Io {
                path: e.path().map(Path::to_path_buf).unwrap_or_else(|| directory.to_path_buf()),
                operation: "walk",
                reason: e.to_string(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let size = entry
                .metadata()
                .map_err(|e| ApplicationError::Io {
                    path: entry.path().to_path_buf(),
                    operation: "stat",
                    reason: e.to_string(),
                })?
                .len();
            stats.record_file(&extension_key(entry.path()), size);
        }

        Ok(stats)
    }
}

#[async_trait]
impl StatsCollector for WalkdirStatsCollector {
    #[instrument(skip(self), fields(dir = %directory.display()))]
    async fn walk(&self, directory: &Path) -> OpsdocResult<GenerationStats> {
        let dir: PathBuf = directory.to_path_buf();
        tokio::task::spawn_blocking(move || Self::walk_blocking(&dir))
            .await
            .map_err(|e| ApplicationError::Io {
                path: directory.to_path_buf(),
                operation: "walk",
                reason: e.to_string(),
            })?
    }
}

/// `.md` for `README.MD`, `""` for `Makefile`.
fn extension_key(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}
