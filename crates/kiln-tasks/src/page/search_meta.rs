//! Search meta enrichment.

use kiln_model::{Model, PageMeta, SearchFields};

use crate::page::breadcrumb_chain;
use crate::task::{Task, TaskError};

/// Builds `page.meta` for the search index: the breadcrumb ancestry plus
/// typed fields (`type: "doc"`, `keywords`).
///
/// Keywords here are the tag list verbatim: an empty list for untagged
/// pages, where header-meta produces an empty string. The two consumers
/// expect different shapes from the same source field.
pub struct CreateSearchMeta;

impl Task for CreateSearchMeta {
    fn name(&self) -> &'static str {
        "search-meta"
    }

    fn execute(&self, model: &mut Model) -> Result<(), TaskError> {
        let titles = model.title_map();
        for page in model.pages_mut() {
            page.meta = Some(PageMeta {
                breadcrumbs: breadcrumb_chain(&titles, &page.url),
                fields: SearchFields {
                    kind: "doc".to_owned(),
                    keywords: page.tags.clone(),
                },
            });
        }
        Ok(())
    }
}
