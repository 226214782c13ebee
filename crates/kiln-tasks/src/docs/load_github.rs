//! Remote document loading from GitHub.

use kiln_github::{GithubClient, GithubRef};
use kiln_model::Model;
use kiln_storage::ContentStore;
use rayon::prelude::*;

use crate::docs::content_key;
use crate::task::{PageFailure, Task, TaskError};

/// Fetches source documents for pages whose `sourceUrl` points at GitHub
/// and stores them as Markdown content blobs.
///
/// Fetches run in parallel on the global rayon pool. Each page's outcome is
/// independent: successful pages get their `contentFile` set even when
/// siblings fail, and the failures surface together after the stage.
pub struct LoadFromGithub {
    store: ContentStore,
    client: GithubClient,
}

impl LoadFromGithub {
    /// Create the stage. `token` authenticates against private repositories.
    #[must_use]
    pub fn new(store: ContentStore, token: Option<String>) -> Self {
        Self {
            store,
            client: GithubClient::new(token),
        }
    }
}

impl Task for LoadFromGithub {
    fn name(&self) -> &'static str {
        "load-from-github"
    }

    fn execute(&self, model: &mut Model) -> Result<(), TaskError> {
        let targets: Vec<(String, GithubRef)> = model
            .pages()
            .iter()
            .filter_map(|page| {
                let source = page.source_url.as_deref()?;
                GithubRef::parse(source).ok().map(|r| (page.url.clone(), r))
            })
            .collect();

        if targets.is_empty() {
            return Ok(());
        }
        tracing::info!(pages = targets.len(), "loading documents from github");

        let fetched: Vec<(String, Result<String, kiln_github::FetchError>)> = targets
            .par_iter()
            .map(|(url, reference)| (url.clone(), self.client.fetch(reference)))
            .collect();

        let total = fetched.len();
        let mut failures = Vec::new();
        for (url, result) in fetched {
            match result {
                Ok(content) => {
                    let key = content_key(&url, "md");
                    self.store.write(&key, content.as_bytes())?;
                    if let Some(page) = model.get_page_mut(&url) {
                        page.content_file = Some(key);
                    }
                }
                Err(error) => {
                    tracing::warn!(url = %url, %error, "document fetch failed");
                    failures.push(PageFailure {
                        url,
                        message: error.to_string(),
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
