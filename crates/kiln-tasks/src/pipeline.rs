//! Sequential stage runner.

use kiln_model::Model;

use crate::task::{Task, TaskError};

/// Runs stages in order against one model.
///
/// The pipeline owns the stage list; the caller owns the model. Each stage
/// gets exclusive mutable access, so independent stages can be reordered
/// freely but never overlap. The first failing stage halts the run; later
/// stages never observe a model that a failed stage left half-enriched.
#[derive(Default)]
pub struct Pipeline {
    tasks: Vec<Box<dyn Task>>,
}

impl Pipeline {
    /// Create an empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage.
    #[must_use]
    pub fn with_task(mut self, task: impl Task + 'static) -> Self {
        self.tasks.push(Box::new(task));
        self
    }

    /// Stage names, in run order.
    #[must_use]
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.tasks.iter().map(|t| t.name()).collect()
    }

    /// Run every stage in order, halting on the first error.
    pub fn run(&self, model: &mut Model) -> Result<(), TaskError> {
        for task in &self.tasks {
            tracing::info!(stage = task.name(), pages = model.len(), "running stage");
            if let Err(error) = task.execute(model) {
                tracing::error!(stage = task.name(), %error, "stage failed");
                return Err(error);
            }
        }
        Ok(())
    }
}
