//! Local document loading.

use std::path::PathBuf;

use kiln_github::GithubRef;
use kiln_model::Model;
use kiln_storage::ContentStore;

use crate::docs::content_key;
use crate::task::{PageFailure, Task, TaskError};

/// Loads source documents for pages whose `sourceUrl` is a local file path
/// (anything that is not a GitHub reference) and stores them as Markdown
/// content blobs.
///
/// Read failures are isolated per page and aggregated, mirroring the remote
/// loader: a missing file for one page never blocks the rest of the build
/// from being enriched.
pub struct LoadFromFile {
    store: ContentStore,
    base_dir: PathBuf,
}

impl LoadFromFile {
    /// Create the stage resolving relative source paths against `base_dir`.
    #[must_use]
    pub fn new(store: ContentStore, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            base_dir: base_dir.into(),
        }
    }
}

impl Task for LoadFromFile {
    fn name(&self) -> &'static str {
        "load-from-file"
    }

    fn execute(&self, model: &mut Model) -> Result<(), TaskError> {
        let targets: Vec<(String, PathBuf)> = model
            .pages()
            .iter()
            .filter_map(|page| {
                let source = page.source_url.as_deref()?;
                if GithubRef::parse(source).is_ok() {
                    return None;
                }
                Some((page.url.clone(), self.base_dir.join(source)))
            })
            .collect();

        if targets.is_empty() {
            return Ok(());
        }
        tracing::info!(pages = targets.len(), "loading documents from files");

        let total = targets.len();
        let mut failures = Vec::new();
        for (url, path) in targets {
            match std::fs::read(&path) {
                Ok(content) => {
                    let key = content_key(&url, "md");
                    self.store.write(&key, &content)?;
                    if let Some(page) = model.get_page_mut(&url) {
                        page.content_file = Some(key);
                    }
                }
                Err(error) => {
                    tracing::warn!(url = %url, path = %path.display(), %error, "document read failed");
                    failures.push(PageFailure {
                        url,
                        message: format!("{}: {error}", path.display()),
                    });
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(TaskError::aggregate(self.name(), total, failures))
        }
    }
}
