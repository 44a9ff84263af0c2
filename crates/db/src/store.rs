//! JSON file backing the project collection.
//!
//! Layout: a single file holding a JSON array of [`Project`] objects.
//! - Missing directory or file is never an error; both are created holding
//!   `[]` on first access.
//! - Writes go to a sibling temp file, are fsynced, then renamed over the
//!   target so readers never observe a partial collection.
//! - In-process mutations are serialised by an async mutex around the
//!   whole read-modify-write. Separate processes sharing the file are
//!   last-writer-wins.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use portfolio_core::project::Project;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, OnceCell};

use crate::error::StoreError;

/// Contents written to a freshly created collection file.
const EMPTY_COLLECTION: &[u8] = b"[]";

/// Durable store for the project collection.
///
/// Designed to be wrapped in `Arc` and shared across request handlers.
#[derive(Debug)]
pub struct ProjectStore {
    path: PathBuf,
    initialized: OnceCell<()>,
    write_lock: Mutex<()>,
}

impl ProjectStore {
    /// Create a store for the file at `path` without touching the disk.
    ///
    /// Initialisation happens on first access; prefer [`ProjectStore::open`]
    /// at process start so failures surface early.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            initialized: OnceCell::new(),
            write_lock: Mutex::new(()),
        }
    }

    /// Create the store and run its one-time initialisation.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self::new(path);
        store.ensure_initialized().await?;
        Ok(store)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full collection.
    pub async fn read_all(&self) -> Result<Vec<Project>, StoreError> {
        self.ensure_initialized().await?;

        loop {
            match fs::read(&self.path).await {
                Ok(bytes) => return self.parse(&bytes),
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    // Removed after start-up. Recreate it, unless another
                    // task beat us to it, in which case read theirs.
                    if self.create_empty_file().await? {
                        return Ok(Vec::new());
                    }
                }
                Err(e) => return Err(self.io_error(e)),
            }
        }
    }

    /// Replace the full collection on disk. Callers hold `write_lock`.
    async fn write_all(&self, projects: &[Project]) -> Result<(), StoreError> {
        self.ensure_parent_dir().await?;

        let json = serde_json::to_vec_pretty(projects).map_err(|source| {
            StoreError::Serialization {
                path: self.path.clone(),
                source,
            }
        })?;

        let temp_path = self.temp_path();
        if let Err(e) = self.replace_with(&temp_path, &json).await {
            if let Err(cleanup) = fs::remove_file(&temp_path).await {
                if cleanup.kind() != ErrorKind::NotFound {
                    tracing::warn!(path = %temp_path.display(), error = %cleanup, "Failed to remove temp file");
                }
            }
            return Err(e);
        }

        tracing::debug!(path = %self.path.display(), count = projects.len(), "Collection written");
        Ok(())
    }

    /// Run a read-modify-write cycle over the whole collection.
    ///
    /// `apply` edits the loaded collection in place. If it returns an error
    /// nothing is written. Concurrent callers within this process queue on
    /// an internal lock.
    pub async fn mutate<T, F>(&self, apply: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Vec<Project>) -> Result<T, StoreError>,
    {
        let _guard = self.write_lock.lock().await;

        let mut projects = self.read_all().await?;
        let output = apply(&mut projects)?;
        self.write_all(&projects).await?;
        Ok(output)
    }

    // ---- private helpers ----

    async fn ensure_initialized(&self) -> Result<(), StoreError> {
        self.initialized
            .get_or_try_init(|| async {
                self.ensure_parent_dir().await?;
                if self.create_empty_file().await? {
                    tracing::info!(path = %self.path.display(), "Created empty project collection");
                }
                Ok::<(), StoreError>(())
            })
            .await?;
        Ok(())
    }

    /// Write `bytes` to `temp_path`, fsync, then rename it over the target.
    async fn replace_with(&self, temp_path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
        let mut file = fs::File::create(temp_path)
            .await
            .map_err(|e| self.io_error(e))?;
        file.write_all(bytes).await.map_err(|e| self.io_error(e))?;
        file.sync_all().await.map_err(|e| self.io_error(e))?;
        drop(file);

        fs::rename(temp_path, &self.path)
            .await
            .map_err(|e| self.io_error(e))
    }

    async fn ensure_parent_dir(&self) -> Result<(), StoreError> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => {
                fs::create_dir_all(dir).await.map_err(|e| self.io_error(e))
            }
            _ => Ok(()),
        }
    }

    /// Create the collection file holding `[]` if it does not exist.
    ///
    /// Returns `true` if this call created it, `false` if it already existed.
    async fn create_empty_file(&self) -> Result<bool, StoreError> {
        self.ensure_parent_dir().await?;

        let result = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .await;

        match result {
            Ok(mut file) => {
                file.write_all(EMPTY_COLLECTION)
                    .await
                    .map_err(|e| self.io_error(e))?;
                file.sync_all().await.map_err(|e| self.io_error(e))?;
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn parse(&self, bytes: &[u8]) -> Result<Vec<Project>, StoreError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        serde_json::from_slice(bytes).map_err(|source| StoreError::Serialization {
            path: self.path.clone(),
            source,
        })
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn temp_path_is_a_sibling() {
        let store = ProjectStore::new("/data/projects.json");
        assert_eq!(store.temp_path(), PathBuf::from("/data/projects.json.tmp"));
    }

    #[test]
    fn whitespace_only_file_is_empty_collection() {
        let store = ProjectStore::new("projects.json");
        assert!(store.parse(b" \n").unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_write_removes_temp_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let target = dir.path().join("projects.json");
        // A non-empty directory at the target makes the rename fail.
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("keep"), b"x").unwrap();
        let store = ProjectStore::new(target.clone());

        let result = store.write_all(&[]).await;

        assert_matches!(result, Err(StoreError::Io { .. }));
        assert!(!store.temp_path().exists());
        assert!(target.join("keep").exists());
    }
}
