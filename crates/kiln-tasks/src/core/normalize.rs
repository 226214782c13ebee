//! Hierarchy normalization.

use std::collections::HashSet;

use kiln_model::{Model, url};

use crate::task::{Task, TaskError};

/// Rebuilds the model into a consistent tree before enrichment.
///
/// Normalizes every page URL (leading slash enforced, trailing slashes
/// stripped), then verifies the hierarchy invariants:
///
/// - URLs are unique within the collection;
/// - every ancestor URL implied by a page's path segments resolves to an
///   existing page (the root included).
///
/// A violated invariant fails the stage and halts the pipeline: a broken
/// hierarchy invalidates breadcrumbs and the sitemap for every descendant,
/// so there is no per-page skip policy here.
pub struct NormalizeModel;

impl Task for NormalizeModel {
    fn name(&self) -> &'static str {
        "normalize-model"
    }

    fn execute(&self, model: &mut Model) -> Result<(), TaskError> {
        let mut pages = model.pages().to_vec();

        let mut seen = HashSet::with_capacity(pages.len());
        for page in &mut pages {
            page.url = url::normalize(&page.url);
            if !seen.insert(page.url.clone()) {
                return Err(TaskError::DuplicateUrl(page.url.clone()));
            }
        }

        for page in &pages {
            for ancestor in url::parent_urls(&page.url) {
                if !seen.contains(&ancestor) {
                    return Err(TaskError::MissingAncestor {
                        page: page.url.clone(),
                        ancestor,
                    });
                }
            }
        }

        model.set_pages(pages);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use kiln_model::Page;
    use pretty_assertions::assert_eq;

    use super::*;

    fn model_of(urls: &[&str]) -> Model {
        let mut model = Model::new();
        model.set_pages(urls.iter().map(|&u| Page::new(u, u)).collect());
        model
    }

    #[test]
    fn test_accepts_consistent_tree() {
        let mut model = model_of(&["/", "/a", "/a/b"]);
        NormalizeModel.execute(&mut model).unwrap();
        assert_eq!(model.len(), 3);
    }

    #[test]
    fn test_normalizes_urls_in_place() {
        let mut model = model_of(&["/", "a", "/a/b/"]);
        NormalizeModel.execute(&mut model).unwrap();

        let urls: Vec<&str> = model.pages().iter().map(|p| p.url.as_str()).collect();
        assert_eq!(urls, vec!["/", "/a", "/a/b"]);
        // Index follows the rewritten URLs
        assert!(model.get_page("/a/b").is_some());
    }

    #[test]
    fn test_missing_ancestor_fails() {
        let mut model = model_of(&["/", "/a/b"]);

        let err = NormalizeModel.execute(&mut model).unwrap_err();
        match err {
            TaskError::MissingAncestor { page, ancestor } => {
                assert_eq!(page, "/a/b");
                assert_eq!(ancestor, "/a");
            }
            other => panic!("expected MissingAncestor, got {other}"),
        }
    }

    #[test]
    fn test_missing_root_fails() {
        let mut model = model_of(&["/a"]);

        let err = NormalizeModel.execute(&mut model).unwrap_err();
        assert!(matches!(
            err,
            TaskError::MissingAncestor { ancestor, .. } if ancestor == "/"
        ));
    }

    #[test]
    fn test_duplicate_url_fails() {
        let mut model = model_of(&["/", "/a", "/a"]);

        let err = NormalizeModel.execute(&mut model).unwrap_err();
        assert!(matches!(err, TaskError::DuplicateUrl(url) if url == "/a"));
    }

    #[test]
    fn test_duplicate_after_normalization_fails() {
        // Distinct as written, identical once normalized
        let mut model = model_of(&["/", "/a", "a/"]);

        let err = NormalizeModel.execute(&mut model).unwrap_err();
        assert!(matches!(err, TaskError::DuplicateUrl(url) if url == "/a"));
    }

    #[test]
    fn test_idempotent() {
        let mut model = model_of(&["/", "/a"]);
        NormalizeModel.execute(&mut model).unwrap();
        let first: Vec<Page> = model.pages().to_vec();

        NormalizeModel.execute(&mut model).unwrap();
        assert_eq!(model.pages(), &first[..]);
    }
}
