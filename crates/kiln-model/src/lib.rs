//! Page model for the Kiln documentation build pipeline.
//!
//! Provides [`Model`], an ordered collection of [`Page`] records with O(1)
//! lookup by URL, and the [`url`] module with pure ancestry functions.
//!
//! # Architecture
//!
//! Pages are stored in a flat `Vec<Page>` in insertion order, with a
//! `HashMap` index from URL to position. Parent/child relationships are
//! never stored: a page's ancestry is always recomputed from its URL via
//! [`url::parent_urls`], so enrichment stages can never observe a stale
//! hierarchy.

mod model;
mod page;
pub mod url;

pub use model::Model;
pub use page::{Breadcrumb, HeaderMeta, Page, PageHeader, PageMeta, SearchFields};
