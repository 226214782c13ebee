//! Markdown to HTML transformation.

use kiln_model::Model;
use kiln_storage::{ContentStore, StoreError};
use pulldown_cmark::{Options, Parser, html};

use crate::docs::content_key;
use crate::task::{PageFailure, Task, TaskError};

/// Renders every page's Markdown content blob to HTML.
///
/// Pages whose `contentFile` ends in `.md` are read from the store, rendered
/// with GFM extensions, written back as `{url}/index.html` and repointed.
/// Read failures are isolated per page; write failures are fatal.
pub struct TransformMarkdown {
    store: ContentStore,
}

impl TransformMarkdown {
    /// Create the stage over the given store.
    #[must_use]
    pub fn new(store: ContentStore) -> Self {
        Self { store }
    }
}

/// Parser options: GitHub Flavored Markdown.
fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM
}

/// Render a Markdown document to HTML.
fn render_markdown(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, parser_options());
    let mut out = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut out, parser);
    out
}

impl Task for TransformMarkdown {
    fn name(&self) -> &'static str {
        "transform-md-html"
    }

    fn execute(&self, model: &mut Model) -> Result<(), TaskError> {
        let targets: Vec<(String, String)> = model
            .pages()
            .iter()
            .filter_map(|page| {
                let content_file = page.content_file.as_deref()?;
                content_file
                    .ends_with(".md")
                    .then(|| (page.url.clone(), content_file.to_owned()))
            })
            .collect();

        if targets.is_empty() {
            return Ok(());
        }
        tracing::info!(pages = targets.len(), "transforming markdown to html");

        let total = targets.len();
        let mut failures = Vec::new();
        for (url, source_key) in targets {
            let markdown = match self.store.read_to_string(&source_key) {
                Ok(markdown) => markdown,
                Err(error @ (StoreError::NotFound(_) | StoreError::InvalidKey(_))) => {
                    tracing::warn!(url = %url, key = %source_key, %error, "markdown source unavailable");
                    failures.push(PageFailure {
                        url,
                        message: error.to_string(),
                    });
                    continue;
                }
                Err(error) => return Err(error.into()),
            };

            let rendered = render_markdown(&markdown);
            let target_key = content_key(&url, "html");
            self.store.write(&target_key, rendered.as_bytes())?;
            if let Some(page) = model.get_page_mut(&url) {
                page.content_file = Some(target_key);
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(TaskError::aggregate(self.name(), total, failures))
        }
    }
}
