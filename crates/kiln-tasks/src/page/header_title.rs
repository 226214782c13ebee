//! Header title enrichment.

use kiln_model::{Model, url};

use crate::task::{Task, TaskError};

/// Default delimiter between ancestor titles.
const DEFAULT_DELIMITER: &str = " / ";

/// Builds `header.title` for every page: the titles of the page's ancestor
/// chain, root to self, joined with a delimiter.
pub struct CreateHeaderTitle {
    delimiter: String,
}

impl CreateHeaderTitle {
    /// Create the stage with a custom delimiter.
    #[must_use]
    pub fn new(delimiter: impl Into<String>) -> Self {
        Self {
            delimiter: delimiter.into(),
        }
    }
}

impl Default for CreateHeaderTitle {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER)
    }
}

impl Task for CreateHeaderTitle {
    fn name(&self) -> &'static str {
        "header-title"
    }

    fn execute(&self, model: &mut Model) -> Result<(), TaskError> {
        let titles = model.title_map();
        for page in model.pages_mut() {
            let joined = url::parent_urls(&page.url)
                .iter()
                .map(|ancestor| titles.get(ancestor).map_or("", String::as_str))
                .collect::<Vec<_>>()
                .join(&self.delimiter);
            page.header_mut().title = Some(joined);
        }
        Ok(())
    }
}
