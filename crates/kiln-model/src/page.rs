//! Page record types.
//!
//! A [`Page`] is one node of the documentation tree, keyed by URL. Every
//! field beyond `url` and `title` is optional until the stage that produces
//! it has run; enrichment stages replace prior values on re-run instead of
//! appending.

use serde::{Deserialize, Serialize};

/// One documentation page.
///
/// Serialized keys are camelCase to match the model file format consumed by
/// the site renderer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Unique identifier: slash-delimited hierarchical path (e.g. `/section/page`).
    pub url: String,
    /// Human-readable page title.
    pub title: String,
    /// Page tags. Empty when absent in the source model.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Where the page's document lives: a GitHub blob URL or a local file path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Output-relative path of the saved content blob, set by docs stages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_file: Option<String>,
    /// Last modification date (W3C datetime), consumed by the sitemap stage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    /// Header data, populated by the header-title and header-meta stages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<PageHeader>,
    /// Ancestry as `{url, title}` pairs, populated by the breadcrumbs stage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breadcrumbs: Option<Vec<Breadcrumb>>,
    /// Search metadata, populated by the search-meta stage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

impl Page {
    /// Create a page with the given URL and title.
    #[must_use]
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Get the page's header, creating an empty one if absent.
    pub fn header_mut(&mut self) -> &mut PageHeader {
        self.header.get_or_insert_with(PageHeader::default)
    }
}

/// Page header data.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageHeader {
    /// Ancestor titles joined with a delimiter, root to self.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Meta tags for the page header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<HeaderMeta>,
}

/// Meta tags synthesized from the page's own fields.
///
/// `keywords`/`ogKeywords` are the tags joined with `", "`: a string, not a
/// list. The search-meta stage keeps the tag list verbatim instead; the two
/// consumers expect different shapes from the same source field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderMeta {
    pub og_url: String,
    pub og_type: String,
    pub description: String,
    pub og_description: String,
    pub keywords: String,
    pub og_keywords: String,
}

/// One breadcrumb entry: an ancestor URL and its title.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub url: String,
    pub title: String,
}

/// Search metadata for a page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Ancestry as `{url, title}` pairs, root to self inclusive.
    pub breadcrumbs: Vec<Breadcrumb>,
    /// Typed search fields.
    pub fields: SearchFields,
}

/// Typed fields for the search index.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFields {
    /// Document kind. Always `"doc"` for pages.
    #[serde(rename = "type")]
    pub kind: String,
    /// Page tags, verbatim. Empty list when the page is untagged.
    pub keywords: Vec<String>,
}
