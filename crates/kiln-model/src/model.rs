//! Ordered page collection with URL lookup.

use std::collections::HashMap;

use crate::page::Page;

/// The full ordered, indexed collection of page records.
///
/// Insertion order is preserved for deterministic output (`data.json` and
/// sitemap entries come out in model-file order). Lookup by URL is O(1) via
/// an internal `HashMap` index.
///
/// The model is shared-mutable by design: every pipeline stage receives
/// `&mut Model` and enriches pages in place. Stages must not rewrite `url`
/// through [`pages_mut`](Self::pages_mut); URL rewrites go through
/// [`set_pages`](Self::set_pages), which rebuilds the index.
#[derive(Debug, Default)]
pub struct Model {
    pages: Vec<Page>,
    index: HashMap<String, usize>,
}

impl Model {
    /// Create an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The live page collection, in insertion order. Never fails; empty
    /// before the load stage has run.
    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Mutable access to the page collection for in-place enrichment.
    pub fn pages_mut(&mut self) -> &mut [Page] {
        &mut self.pages
    }

    /// Look up a page by URL.
    ///
    /// Returns `None` when absent, a normal non-error outcome during
    /// partial builds.
    #[must_use]
    pub fn get_page(&self, url: &str) -> Option<&Page> {
        self.index.get(url).map(|&i| &self.pages[i])
    }

    /// Look up a page by URL for mutation.
    #[must_use]
    pub fn get_page_mut(&mut self, url: &str) -> Option<&mut Page> {
        let i = *self.index.get(url)?;
        Some(&mut self.pages[i])
    }

    /// Replace the collection wholesale and rebuild the URL index.
    ///
    /// Used by the merge and normalize stages only. On duplicate URLs the
    /// index keeps the last occurrence; normalization reports duplicates as
    /// a hierarchy error before any enrichment stage can observe them.
    pub fn set_pages(&mut self, pages: Vec<Page>) {
        self.index = pages
            .iter()
            .enumerate()
            .map(|(i, page)| (page.url.clone(), i))
            .collect();
        self.pages = pages;
    }

    /// Number of pages in the model.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// True when the model holds no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Titles keyed by URL, cloned out of the collection.
    ///
    /// Enrichment stages that walk ancestor chains while mutating pages use
    /// this snapshot to avoid holding a borrow across the mutation loop.
    #[must_use]
    pub fn title_map(&self) -> HashMap<String, String> {
        self.pages
            .iter()
            .map(|page| (page.url.clone(), page.title.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn model_with(urls: &[(&str, &str)]) -> Model {
        let mut model = Model::new();
        model.set_pages(
            urls.iter()
                .map(|&(url, title)| Page::new(url, title))
                .collect(),
        );
        model
    }

    #[test]
    fn test_empty_model() {
        let model = Model::new();
        assert!(model.is_empty());
        assert_eq!(model.pages().len(), 0);
        assert!(model.get_page("/").is_none());
    }

    #[test]
    fn test_set_pages_builds_index() {
        let model = model_with(&[("/", "Home"), ("/a", "A"), ("/a/b", "B")]);

        assert_eq!(model.len(), 3);
        assert_eq!(model.get_page("/a").map(|p| p.title.as_str()), Some("A"));
        assert_eq!(model.get_page("/a/b").map(|p| p.title.as_str()), Some("B"));
        assert!(model.get_page("/missing").is_none());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let model = model_with(&[("/z", "Z"), ("/a", "A"), ("/m", "M")]);

        let urls: Vec<&str> = model.pages().iter().map(|p| p.url.as_str()).collect();
        assert_eq!(urls, vec!["/z", "/a", "/m"]);
    }

    #[test]
    fn test_set_pages_replaces_collection() {
        let mut model = model_with(&[("/", "Home"), ("/old", "Old")]);
        model.set_pages(vec![Page::new("/", "Home"), Page::new("/new", "New")]);

        assert!(model.get_page("/old").is_none());
        assert!(model.get_page("/new").is_some());
        assert_eq!(model.len(), 2);
    }

    #[test]
    fn test_get_page_mut_mutates_in_place() {
        let mut model = model_with(&[("/", "Home")]);
        model.get_page_mut("/").unwrap().title = "Start".to_owned();

        assert_eq!(model.get_page("/").unwrap().title, "Start");
    }

    #[test]
    fn test_duplicate_urls_last_wins_in_index() {
        let model = model_with(&[("/a", "First"), ("/a", "Second")]);

        // Both stay in the collection; the index resolves to the last one.
        assert_eq!(model.len(), 2);
        assert_eq!(model.get_page("/a").unwrap().title, "Second");
    }

    #[test]
    fn test_title_map_snapshot() {
        let model = model_with(&[("/", "Home"), ("/a", "A")]);
        let titles = model.title_map();

        assert_eq!(titles.get("/").map(String::as_str), Some("Home"));
        assert_eq!(titles.get("/a").map(String::as_str), Some("A"));
    }
}
