//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `opsdoc-adapters` crate provides implementations.

use async_trait::async_trait;
use std::path::Path;

use crate::application::report::GenerationStats;
use crate::domain::{FileMode, RecordSet};
use crate::error::OpsdocResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `opsdoc_adapters::filesystem::LocalFilesystem` (production)
/// - `opsdoc_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - Paths arrive already resolved by the sandbox
/// - Permissions are capability-based; adapters without Unix modes ignore them
/// - `create_dir_all` must treat "already exists" as success, including when
///   sibling tasks race to create the same directory
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    async fn create_dir_all(&self, path: &Path) -> OpsdocResult<()>;

    /// Write content to a file in one buffered call.
    async fn write_file(&self, path: &Path, content: &[u8]) -> OpsdocResult<()>;

    /// Write content in `chunk_size` pieces, resolving once the stream has
    /// been flushed and closed.
    async fn write_streaming(
        &self,
        path: &Path,
        content: &[u8],
        chunk_size: usize,
    ) -> OpsdocResult<()>;

    /// Set permissions on a file or directory.
    async fn set_permissions(&self, path: &Path, mode: FileMode) -> OpsdocResult<()>;

    /// Check if path exists.
    async fn exists(&self, path: &Path) -> bool;
}

/// Port for gathering the records to document.
///
/// Implemented by:
/// - `opsdoc_adapters::collector::ProjectCollector` (source scan + samples)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordCollector: Send + Sync {
    /// Collect every record for one run. Missing scan targets are not errors.
    async fn collect(&self) -> OpsdocResult<RecordSet>;
}

/// Port for summarizing a generated tree.
///
/// Implemented by:
/// - `opsdoc_adapters::stats::WalkdirStatsCollector`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsCollector: Send + Sync {
    /// Walk `directory` recursively. A missing directory yields zeroed stats.
    async fn walk(&self, directory: &Path) -> OpsdocResult<GenerationStats>;
}
