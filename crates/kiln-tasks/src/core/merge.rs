//! Model loading and merging.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use kiln_model::{Model, Page};

use crate::task::{Task, TaskError};

/// Loads the declarative model file and replaces the current collection.
///
/// When the model already holds pages from a previous build, the difference
/// against the incoming file is logged (added/modified/removed counts) before
/// the wholesale replacement.
pub struct MergeModels {
    model_path: PathBuf,
}

impl MergeModels {
    /// Create the stage for the given model file path.
    #[must_use]
    pub fn new(model_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
        }
    }
}

impl Task for MergeModels {
    fn name(&self) -> &'static str {
        "merge-models"
    }

    fn execute(&self, model: &mut Model) -> Result<(), TaskError> {
        let raw = std::fs::read(&self.model_path).map_err(|source| {
            tracing::error!(path = %self.model_path.display(), %source, "failed to read model file");
            TaskError::Io {
                path: self.model_path.clone(),
                source,
            }
        })?;
        let incoming: Vec<Page> = serde_json::from_slice(&raw)?;

        let previous: HashMap<&str, &Page> =
            model.pages().iter().map(|p| (p.url.as_str(), p)).collect();

        let mut added = 0usize;
        let mut modified = 0usize;
        for page in &incoming {
            match previous.get(page.url.as_str()) {
                None => added += 1,
                Some(old) if *old != page => modified += 1,
                Some(_) => {}
            }
        }
        let incoming_urls: HashSet<&str> = incoming.iter().map(|p| p.url.as_str()).collect();
        let removed = model
            .pages()
            .iter()
            .filter(|p| !incoming_urls.contains(p.url.as_str()))
            .count();

        tracing::info!(
            total = incoming.len(),
            added,
            modified,
            removed,
            "model merged"
        );

        model.set_pages(incoming);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn write_model(dir: &TempDir, json: &str) -> PathBuf {
        let path = dir.path().join("model.json");
        std::fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn test_loads_model_file() {
        let tmp = TempDir::new().unwrap();
        let path = write_model(
            &tmp,
            r#"[{"url":"/","title":"Home"},{"url":"/a","title":"A","tags":["t1"]}]"#,
        );

        let mut model = Model::new();
        MergeModels::new(path).execute(&mut model).unwrap();

        assert_eq!(model.len(), 2);
        assert_eq!(model.get_page("/a").unwrap().tags, vec!["t1"]);
    }

    #[test]
    fn test_replaces_previous_collection() {
        let tmp = TempDir::new().unwrap();
        let path = write_model(&tmp, r#"[{"url":"/","title":"Home"}]"#);

        let mut model = Model::new();
        model.set_pages(vec![Page::new("/", "Old Home"), Page::new("/gone", "Gone")]);

        MergeModels::new(path).execute(&mut model).unwrap();

        assert_eq!(model.len(), 1);
        assert_eq!(model.get_page("/").unwrap().title, "Home");
        assert!(model.get_page("/gone").is_none());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let task = MergeModels::new(tmp.path().join("absent.json"));

        let err = task.execute(&mut Model::new()).unwrap_err();
        assert!(matches!(err, TaskError::Io { .. }));
    }

    #[test]
    fn test_malformed_json_is_model_error() {
        let tmp = TempDir::new().unwrap();
        let path = write_model(&tmp, r#"{"not":"an array"}"#);

        let err = MergeModels::new(path).execute(&mut Model::new()).unwrap_err();
        assert!(matches!(err, TaskError::Model(_)));
    }
}
