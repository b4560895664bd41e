//! Sandboxed document writer.
//!
//! Every write goes: sandbox resolve -> create parents -> buffered or
//! streaming write -> permissions. There is no atomic rename; a crash
//! mid-write can leave a partial file behind.

use std::path::Path;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{FileMode, PathSandbox},
    error::{OpsdocError, OpsdocResult},
};

/// Size and permission policy for [`DocumentWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriterPolicy {
    /// Content strictly larger than this is streamed.
    pub streaming_threshold: usize,
    pub chunk_size: usize,
    pub file_mode: FileMode,
    pub directory_mode: FileMode,
}

impl WriterPolicy {
    pub const DEFAULT_STREAMING_THRESHOLD: usize = 1024 * 1024;
    pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

    pub fn with_streaming_threshold(mut self, bytes: usize) -> Self {
        self.streaming_threshold = bytes;
        self
    }

    pub fn with_chunk_size(mut self, bytes: usize) -> Self {
        self.chunk_size = bytes.max(1);
        self
    }

    pub fn should_stream(&self, len: usize) -> bool {
        len > self.streaming_threshold
    }
}

impl Default for WriterPolicy {
    fn default() -> Self {
        Self {
            streaming_threshold: Self::DEFAULT_STREAMING_THRESHOLD,
            chunk_size: Self::DEFAULT_CHUNK_SIZE,
            file_mode: FileMode::document(),
            directory_mode: FileMode::directory(),
        }
    }
}

/// Persists rendered text below a base directory.
#[derive(Clone)]
pub struct DocumentWriter {
    filesystem: Arc<dyn Filesystem>,
    sandbox: PathSandbox,
    policy: WriterPolicy,
}

impl DocumentWriter {
    pub fn new(filesystem: Arc<dyn Filesystem>, sandbox: PathSandbox, policy: WriterPolicy) -> Self {
        Self {
            filesystem,
            sandbox,
            policy,
        }
    }

    pub fn policy(&self) -> &WriterPolicy {
        &self.policy
    }

    /// Write `content` to `base_dir/relative_path` and return the number of
    /// bytes written.
    ///
    /// # Errors
    ///
    /// - `DomainError::Security` if the sandbox rejects `relative_path`
    /// - `ApplicationError::Io` (carrying `relative_path`) for any filesystem
    ///   failure
    pub async fn write(
        &self,
        base_dir: &Path,
        relative_path: &str,
        content: &str,
    ) -> OpsdocResult<u64> {
        let target = self.sandbox.resolve(base_dir, relative_path)?;
        let bytes = content.as_bytes();

        if let Some(parent) = target.parent() {
            self.filesystem
                .create_dir_all(parent)
                .await
                .map_err(|e| with_relative(relative_path, "create directory", e))?;
            self.filesystem
                .set_permissions(parent, self.policy.directory_mode)
                .await
                .map_err(|e| with_relative(relative_path, "set directory permissions", e))?;
        }

        if self.policy.should_stream(bytes.len()) {
            debug!(path = relative_path, size = bytes.len(), "Streaming write");
            self.filesystem
                .write_streaming(&target, bytes, self.policy.chunk_size)
                .await
                .map_err(|e| with_relative(relative_path, "stream", e))?;
        } else {
            trace!(path = relative_path, size = bytes.len(), "Buffered write");
            self.filesystem
                .write_file(&target, bytes)
                .await
                .map_err(|e| with_relative(relative_path, "write", e))?;
        }

        self.filesystem
            .set_permissions(&target, self.policy.file_mode)
            .await
            .map_err(|e| with_relative(relative_path, "set permissions", e))?;

        Ok(bytes.len() as u64)
    }
}

impl std::fmt::Debug for DocumentWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentWriter")
            .field("sandbox", &self.sandbox)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// Re-label a port error with the path the caller asked for.
fn with_relative(relative_path: &str, operation: &'static str, err: OpsdocError) -> OpsdocError {
    let reason = match err {
        OpsdocError::Application(ApplicationError::Io { reason, .. }) => reason,
        other => other.to_string(),
    };
    ApplicationError::Io {
        path: relative_path.into(),
        operation,
        reason,
    }
    .into()
}
