//! Page enrichment stages: header title, header meta, breadcrumbs, search
//! meta.
//!
//! All four require [`NormalizeModel`](crate::core::NormalizeModel) to have
//! run; among themselves they are order-independent.

mod breadcrumbs;
mod header_meta;
mod header_title;
mod search_meta;

use std::collections::HashMap;

use kiln_model::{Breadcrumb, url};

pub use breadcrumbs::CreateBreadcrumbs;
pub use header_meta::CreateHeaderMeta;
pub use header_title::CreateHeaderTitle;
pub use search_meta::CreateSearchMeta;

/// Ancestry of a page as `{url, title}` pairs, root to self inclusive.
///
/// Titles are resolved against a URL→title snapshot of the model; ancestors
/// absent from the snapshot are skipped (normalization guarantees there are
/// none).
fn breadcrumb_chain(titles: &HashMap<String, String>, page_url: &str) -> Vec<Breadcrumb> {
    url::parent_urls(page_url)
        .into_iter()
        .filter_map(|ancestor| {
            titles.get(&ancestor).map(|title| Breadcrumb {
                url: ancestor,
                title: title.clone(),
            })
        })
        .collect()
}
