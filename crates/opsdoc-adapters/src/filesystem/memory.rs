//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use async_trait::async_trait;

use opsdoc_core::{
    application::{ApplicationError, ports::Filesystem},
    domain::FileMode,
    error::{OpsdocError, OpsdocResult},
};

/// In-memory filesystem for testing.
///
/// Clones share the same tree.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, Vec<u8>>,
    directories: BTreeSet<PathBuf>,
    modes: HashMap<PathBuf, u32>,
    streamed: BTreeSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner
            .files
            .get(path)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// All files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Unix mode last applied to `path`, if any.
    pub fn mode_of(&self, path: &Path) -> Option<u32> {
        self.inner.read().ok()?.modes.get(path).copied()
    }

    /// Whether `path` was last written through the streaming path.
    pub fn was_streamed(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.streamed.contains(path))
            .unwrap_or(false)
    }

    fn insert(&self, path: &Path, content: &[u8], streamed: bool) -> OpsdocResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error(path))?;

        let orphaned = path
            .parent()
            .is_some_and(|p| !p.as_os_str().is_empty() && !inner.directories.contains(p));
        if orphaned {
            return Err(ApplicationError::Io {
                path: path.to_path_buf(),
                operation: "write",
                reason: "parent directory does not exist".into(),
            }
            .into());
        }

        inner.files.insert(path.to_path_buf(), content.to_vec());
        if streamed {
            inner.streamed.insert(path.to_path_buf());
        } else {
            inner.streamed.remove(path);
        }
        Ok(())
    }
}

#[async_trait]
impl Filesystem for MemoryFilesystem {
    async fn create_dir_all(&self, path: &Path) -> OpsdocResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error(path))?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    async fn write_file(&self, path: &Path, content: &[u8]) -> OpsdocResult<()> {
        self.insert(path, content, false)
    }

    async fn write_streaming(
        &self,
        path: &Path,
        content: &[u8],
        _chunk_size: usize,
    ) -> OpsdocResult<()> {
        self.insert(path, content, true)
    }

    async fn set_permissions(&self, path: &Path, mode: FileMode) -> OpsdocResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error(path))?;
        inner.modes.insert(path.to_path_buf(), mode.mode());
        Ok(())
    }

    async fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }
}

fn lock_error(path: &Path) -> OpsdocError {
    ApplicationError::Io {
        path: path.to_path_buf(),
        operation: "lock",
        reason: "memory filesystem lock poisoned".into(),
    }
    .into()
}
