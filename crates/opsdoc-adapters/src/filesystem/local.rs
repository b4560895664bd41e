//! Local filesystem adapter using tokio::fs.

use std::io;
use std::path::Path;

use async_trait::async_trait;
use tokio::io::{AsyncWriteExt, BufWriter};

use opsdoc_core::{
    application::{ApplicationError, ports::Filesystem},
    domain::FileMode,
    error::{OpsdocError, OpsdocResult},
};

/// Production filesystem implementation using `tokio::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Filesystem for LocalFilesystem {
    async fn create_dir_all(&self, path: &Path) -> OpsdocResult<()> {
        match tokio::fs::create_dir_all(path).await {
            Ok(()) => Ok(()),
            // a sibling task won the race
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
            Err(e) => Err(map_io_error(path, e, "create directory")),
        }
    }

    async fn write_file(&self, path: &Path, content: &[u8]) -> OpsdocResult<()> {
        tokio::fs::write(path, content)
            .await
            .map_err(|e| map_io_error(path, e, "write file"))
    }

    async fn write_streaming(
        &self,
        path: &Path,
        content: &[u8],
        chunk_size: usize,
    ) -> OpsdocResult<()> {
        let file = tokio::fs::File::create(path)
            .await
            .map_err(|e| map_io_error(path, e, "create file"))?;
        let mut writer = BufWriter::with_capacity(chunk_size.max(1), file);

        for chunk in content.chunks(chunk_size.max(1)) {
            writer
                .write_all(chunk)
                .await
                .map_err(|e| map_io_error(path, e, "stream"))?;
        }
        writer
            .flush()
            .await
            .map_err(|e| map_io_error(path, e, "flush"))?;
        writer
            .shutdown()
            .await
            .map_err(|e| map_io_error(path, e, "close"))
    }

    async fn set_permissions(&self, path: &Path, mode: FileMode) -> OpsdocResult<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(mode.mode());
            tokio::fs::set_permissions(path, perms)
                .await
                .map_err(|e| map_io_error(path, e, "set permissions"))?;
        }
        #[cfg(not(unix))]
        {
            let _ = (path, mode);
        }
        Ok(())
    }

    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &'static str) -> OpsdocError {
    ApplicationError::Io {
        path: path.to_path_buf(),
        operation,
        reason: e.to_string(),
    }
    .into()
}
