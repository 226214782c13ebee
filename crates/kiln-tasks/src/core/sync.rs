//! Output synchronization stage.

use std::path::PathBuf;

use kiln_model::Model;
use kiln_sync::Syncer;

use crate::task::{Task, TaskError};

/// Copies the output directory to the configured destination.
///
/// Runs once, after every artifact has been written. The model is not
/// touched; a sync failure is fatal to the build.
pub struct SyncOutput {
    source: PathBuf,
    dest: PathBuf,
    exclude: Vec<String>,
}

impl SyncOutput {
    /// Create the stage copying `source` into `dest`, skipping paths that
    /// match the exclude glob patterns.
    #[must_use]
    pub fn new(
        source: impl Into<PathBuf>,
        dest: impl Into<PathBuf>,
        exclude: Vec<String>,
    ) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
            exclude,
        }
    }
}

impl Task for SyncOutput {
    fn name(&self) -> &'static str {
        "sync-output"
    }

    fn execute(&self, _model: &mut Model) -> Result<(), TaskError> {
        let syncer = Syncer::new(&self.dest, &self.exclude)?;
        let copied = syncer.sync(&self.source)?;
        tracing::info!(copied, dest = %self.dest.display(), "output synchronized");
        Ok(())
    }
}
