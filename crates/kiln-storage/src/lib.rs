//! Content-blob persistence for the Kiln build pipeline.
//!
//! [`ContentStore`] writes and reads build artifacts (markdown sources,
//! transformed HTML, the model file, the sitemap) as files under an output
//! root, keyed by URL-derived relative paths:
//!
//! ```text
//! {root}/
//! +-- data.json
//! +-- sitemap.xml
//! +-- guide/
//! |   +-- index.html
//! +-- guide/setup/
//!     +-- index.html
//! ```
//!
//! Unlike a cache, entries here are build outputs: write failures are logged
//! and propagated to the caller, never swallowed.

use std::fs;
use std::path::{Path, PathBuf};

/// Error raised by store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested key does not exist.
    #[error("not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Key escapes the store root or is otherwise unusable.
    #[error("invalid key: {0}")]
    InvalidKey(String),
    /// Underlying I/O failure.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    fn io(path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(path)
        } else {
            Self::Io { path, source }
        }
    }
}

/// File store rooted at the build output directory.
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// first write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The output root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a key to a path inside the root.
    ///
    /// Keys are relative, slash-delimited paths. Absolute keys and `..`
    /// components are rejected so a malformed model cannot write outside the
    /// output directory.
    fn resolve(&self, key: &str) -> Result<PathBuf, StoreError> {
        let trimmed = key.trim_start_matches('/');
        if trimmed.is_empty() {
            return Err(StoreError::InvalidKey(key.to_owned()));
        }
        let relative = Path::new(trimmed);
        if relative
            .components()
            .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(StoreError::InvalidKey(key.to_owned()));
        }
        Ok(self.root.join(relative))
    }

    /// Write a blob under `key`, creating parent directories as needed.
    pub fn write(&self, key: &str, contents: &[u8]) -> Result<(), StoreError> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            tracing::error!(key, error = %e, "failed to create output directory");
            return Err(StoreError::io(parent.to_path_buf(), e));
        }
        fs::write(&path, contents).map_err(|e| {
            tracing::error!(key, error = %e, "failed to write output file");
            StoreError::io(path, e)
        })
    }

    /// Read the blob stored under `key`.
    pub fn read(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        let path = self.resolve(key)?;
        fs::read(&path).map_err(|e| StoreError::io(path, e))
    }

    /// Read the blob stored under `key` as UTF-8 text.
    pub fn read_to_string(&self, key: &str) -> Result<String, StoreError> {
        let path = self.resolve(key)?;
        fs::read_to_string(&path).map_err(|e| StoreError::io(path, e))
    }

    /// True if a blob exists under `key`. Errors read as "doesn't exist".
    #[must_use]
    pub fn exists(&self, key: &str) -> bool {
        self.resolve(key).is_ok_and(|path| path.is_file())
    }
}
