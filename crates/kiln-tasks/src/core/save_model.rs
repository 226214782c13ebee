//! Model persistence.

use kiln_model::Model;
use kiln_storage::ContentStore;

use crate::task::{Task, TaskError};

/// Output key of the serialized model.
const DATA_KEY: &str = "data.json";

/// Serializes the enriched model to `data.json` in the output store.
///
/// Write failures are logged with the operation context and re-raised; the
/// build has no partial-success policy for its primary artifact.
pub struct SaveModel {
    store: ContentStore,
}

impl SaveModel {
    /// Create the stage writing into the given store.
    #[must_use]
    pub fn new(store: ContentStore) -> Self {
        Self { store }
    }
}

impl Task for SaveModel {
    fn name(&self) -> &'static str {
        "save-model"
    }

    fn execute(&self, model: &mut Model) -> Result<(), TaskError> {
        let serialized = serde_json::to_vec(model.pages())?;
        if let Err(error) = self.store.write(DATA_KEY, &serialized) {
            tracing::error!(%error, "error occurred while saving model to file");
            return Err(error.into());
        }
        tracing::info!(pages = model.len(), key = DATA_KEY, "model saved");
        Ok(())
    }
}
