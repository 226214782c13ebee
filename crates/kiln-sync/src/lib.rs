//! Output directory synchronization.
//!
//! [`Syncer`] copies the build output directory to a destination, skipping
//! paths that match exclude glob patterns. It runs once at the end of a
//! build; any failure is fatal to the build, with no partial-success
//! reporting at this boundary.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use glob::Pattern;

/// Error raised when synchronization fails.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Source directory is missing.
    #[error("source directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    /// An exclude pattern is not a valid glob.
    #[error("invalid exclude pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    /// Underlying I/O failure.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Copies a directory tree to a destination, honoring exclude patterns.
#[derive(Debug)]
pub struct Syncer {
    dest: PathBuf,
    exclude: Vec<Pattern>,
}

impl Syncer {
    /// Create a syncer for the given destination.
    ///
    /// Exclude patterns are glob strings matched against paths relative to
    /// the source root (e.g. `"*.md"`, `"*.meta.json"`, `"model.json"`).
    pub fn new(dest: impl Into<PathBuf>, exclude: &[String]) -> Result<Self, SyncError> {
        let exclude = exclude
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|source| SyncError::InvalidPattern {
                    pattern: p.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            dest: dest.into(),
            exclude,
        })
    }

    /// Copy `source` into the destination directory.
    ///
    /// Returns the number of files copied.
    pub fn sync(&self, source: &Path) -> Result<usize, SyncError> {
        if !source.is_dir() {
            return Err(SyncError::SourceNotFound(source.to_path_buf()));
        }

        let files = collect_files(source)?;
        let mut copied = 0;

        for (relative, abs_path) in &files {
            if self.is_excluded(relative) {
                tracing::debug!(path = %relative, "excluded from sync");
                continue;
            }

            let target = self.dest.join(relative);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|source| SyncError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            fs::copy(abs_path, &target).map_err(|source| SyncError::Io {
                path: target.clone(),
                source,
            })?;
            copied += 1;
        }

        tracing::info!(
            copied,
            excluded = files.len() - copied,
            dest = %self.dest.display(),
            "sync complete"
        );
        Ok(copied)
    }

    /// True when a relative path matches any exclude pattern, either as a
    /// whole path or by file name.
    fn is_excluded(&self, relative: &str) -> bool {
        let name = relative.rsplit('/').next().unwrap_or(relative);
        self.exclude
            .iter()
            .any(|p| p.matches(relative) || p.matches(name))
    }
}

/// Collect all files under `base` as `(relative, absolute)` pairs.
fn collect_files(base: &Path) -> Result<Vec<(String, PathBuf)>, SyncError> {
    let mut files = Vec::new();
    walk_dir(base, base, &mut files).map_err(|(path, source)| SyncError::Io { path, source })?;
    Ok(files)
}

fn walk_dir(
    base: &Path,
    current: &Path,
    files: &mut Vec<(String, PathBuf)>,
) -> Result<(), (PathBuf, io::Error)> {
    let entries = fs::read_dir(current).map_err(|e| (current.to_path_buf(), e))?;
    for entry in entries {
        let entry = entry.map_err(|e| (current.to_path_buf(), e))?;
        let path = entry.path();
        if path.is_dir() {
            walk_dir(base, &path, files)?;
        } else {
            let relative = path
                .strip_prefix(base)
                .unwrap_or(&path)
                .to_string_lossy()
                .replace('\\', "/");
            files.push((relative, path));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn setup() -> (TempDir, PathBuf, PathBuf) {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("out");
        let dest = tmp.path().join("data");
        fs::create_dir_all(source.join("guide")).unwrap();
        fs::write(source.join("data.json"), "[]").unwrap();
        fs::write(source.join("sitemap.xml"), "<urlset/>").unwrap();
        fs::write(source.join("guide/index.html"), "<h1>G</h1>").unwrap();
        fs::write(source.join("guide/index.md"), "# G").unwrap();
        (tmp, source, dest)
    }

    #[test]
    fn test_sync_copies_tree() {
        let (_tmp, source, dest) = setup();
        let syncer = Syncer::new(&dest, &[]).unwrap();

        let copied = syncer.sync(&source).unwrap();

        assert_eq!(copied, 4);
        assert!(dest.join("data.json").is_file());
        assert!(dest.join("guide/index.html").is_file());
    }

    #[test]
    fn test_sync_honors_exclude_globs() {
        let (_tmp, source, dest) = setup();
        let syncer = Syncer::new(&dest, &["*.md".to_owned()]).unwrap();

        let copied = syncer.sync(&source).unwrap();

        assert_eq!(copied, 3);
        assert!(dest.join("guide/index.html").is_file());
        assert!(!dest.join("guide/index.md").exists());
    }

    #[test]
    fn test_sync_excludes_by_exact_name() {
        let (_tmp, source, dest) = setup();
        let syncer = Syncer::new(&dest, &["data.json".to_owned()]).unwrap();

        syncer.sync(&source).unwrap();

        assert!(!dest.join("data.json").exists());
        assert!(dest.join("sitemap.xml").is_file());
    }

    #[test]
    fn test_sync_missing_source_fails() {
        let tmp = TempDir::new().unwrap();
        let syncer = Syncer::new(tmp.path().join("dest"), &[]).unwrap();

        let err = syncer.sync(&tmp.path().join("missing")).unwrap_err();
        assert!(matches!(err, SyncError::SourceNotFound(_)));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let err = Syncer::new("/tmp/dest", &["[".to_owned()]).unwrap_err();
        assert!(matches!(err, SyncError::InvalidPattern { .. }));
    }

    #[test]
    fn test_sync_is_idempotent() {
        let (_tmp, source, dest) = setup();
        let syncer = Syncer::new(&dest, &[]).unwrap();

        syncer.sync(&source).unwrap();
        let copied = syncer.sync(&source).unwrap();

        assert_eq!(copied, 4);
        assert_eq!(fs::read_to_string(dest.join("data.json")).unwrap(), "[]");
    }
}
