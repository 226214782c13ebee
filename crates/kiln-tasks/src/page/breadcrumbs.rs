//! Breadcrumb enrichment.

use kiln_model::Model;

use crate::page::breadcrumb_chain;
use crate::task::{Task, TaskError};

/// Builds `page.breadcrumbs`: the `{url, title}` ancestry of every page,
/// root to self inclusive.
pub struct CreateBreadcrumbs;

impl Task for CreateBreadcrumbs {
    fn name(&self) -> &'static str {
        "breadcrumbs"
    }

    fn execute(&self, model: &mut Model) -> Result<(), TaskError> {
        let titles = model.title_map();
        for page in model.pages_mut() {
            page.breadcrumbs = Some(breadcrumb_chain(&titles, &page.url));
        }
        Ok(())
    }
}
