//! Task trait and error types.

use std::path::PathBuf;

use kiln_model::Model;
use kiln_storage::StoreError;
use kiln_sync::SyncError;

/// One composable transformation over the model.
///
/// Constructing a task does nothing; work is deferred until the pipeline
/// invokes [`execute`](Task::execute). Tasks receive exclusive access to the
/// model for the duration of the call; the pipeline serializes stage entry.
pub trait Task {
    /// Stage name used in logs and aggregate errors.
    fn name(&self) -> &'static str;

    /// Run the stage against the model.
    fn execute(&self, model: &mut Model) -> Result<(), TaskError>;
}

/// A single page's failure inside a stage with per-item isolation.
#[derive(Debug, thiserror::Error)]
#[error("{url}: {message}")]
pub struct PageFailure {
    /// URL of the page that failed.
    pub url: String,
    /// Human-readable failure description.
    pub message: String,
}

/// Error raised by a pipeline stage.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// A page's computed ancestor URL does not exist in the model.
    #[error("page {page}: ancestor {ancestor} not found in model")]
    MissingAncestor { page: String, ancestor: String },

    /// Two pages share one URL.
    #[error("duplicate page URL: {0}")]
    DuplicateUrl(String),

    /// Read/write failure outside the content store.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Content store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Output synchronization failure.
    #[error(transparent)]
    Sync(#[from] SyncError),

    /// Model (de)serialization failure.
    #[error("model serialization failed: {0}")]
    Model(#[from] serde_json::Error),

    /// Per-page failures collected by a stage that isolates them.
    ///
    /// The stage has already processed every page it could; this surfaces
    /// the remainder once the stage completes.
    #[error("{task}: {} of {total} pages failed", .failures.len())]
    Aggregate {
        task: &'static str,
        total: usize,
        failures: Vec<PageFailure>,
    },
}

impl TaskError {
    /// Build an aggregate error from per-page failures.
    #[must_use]
    pub fn aggregate(task: &'static str, total: usize, failures: Vec<PageFailure>) -> Self {
        Self::Aggregate {
            task,
            total,
            failures,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_display_counts() {
        let err = TaskError::aggregate(
            "load-from-github",
            5,
            vec![
                PageFailure {
                    url: "/a".to_owned(),
                    message: "HTTP 404".to_owned(),
                },
                PageFailure {
                    url: "/b".to_owned(),
                    message: "timeout".to_owned(),
                },
            ],
        );

        assert_eq!(err.to_string(), "load-from-github: 2 of 5 pages failed");
    }

    #[test]
    fn test_page_failure_display() {
        let failure = PageFailure {
            url: "/guide".to_owned(),
            message: "HTTP 403".to_owned(),
        };

        assert_eq!(failure.to_string(), "/guide: HTTP 403");
    }
}
