//! Header meta enrichment.

use kiln_model::{HeaderMeta, Model};

use crate::task::{Task, TaskError};

/// Builds `header.meta` for every page from the page's own fields: `ogUrl`,
/// `ogType`, `description`, `ogDescription`, `keywords` and `ogKeywords`.
///
/// A pure per-page transform with no tree traversal. Keywords are the tags
/// joined with `", "`, an empty string for untagged pages (the search-meta
/// stage keeps the list form instead).
pub struct CreateHeaderMeta;

impl Task for CreateHeaderMeta {
    fn name(&self) -> &'static str {
        "header-meta"
    }

    fn execute(&self, model: &mut Model) -> Result<(), TaskError> {
        for page in model.pages_mut() {
            let keywords = page.tags.join(", ");
            let meta = HeaderMeta {
                og_url: page.url.clone(),
                og_type: "article".to_owned(),
                description: page.title.clone(),
                og_description: page.title.clone(),
                keywords: keywords.clone(),
                og_keywords: keywords,
            };
            page.header_mut().meta = Some(meta);
        }
        Ok(())
    }
}
