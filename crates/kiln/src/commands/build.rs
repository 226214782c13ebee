//! `kiln build` command.

use std::path::{Path, PathBuf};

use clap::Args;
use kiln_config::Config;
use kiln_model::Model;
use kiln_storage::ContentStore;
use kiln_tasks::core::{MergeModels, NormalizeModel, SaveModel, SyncOutput};
use kiln_tasks::docs::{LoadFromFile, LoadFromGithub, TransformMarkdown};
use kiln_tasks::page::{CreateBreadcrumbs, CreateHeaderMeta, CreateHeaderTitle, CreateSearchMeta};
use kiln_tasks::{CreateSitemap, Pipeline};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the `build` command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to kiln.toml. Discovered from the current directory when omitted.
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,

    /// Enable verbose (INFO level) logging.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl BuildArgs {
    /// Run the build pipeline.
    pub(crate) fn execute(&self, output: &Output) -> Result<(), CliError> {
        let config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::discover(&std::env::current_dir()?)?,
        };

        let pipeline = assemble_pipeline(&config)?;
        output.info(&format!("Stages: {}", pipeline.stage_names().join(", ")));

        let mut model = Model::new();
        pipeline.run(&mut model)?;

        output.success(&format!(
            "Built {} pages into {}",
            model.len(),
            config.output_dir.display()
        ));
        Ok(())
    }
}

/// Assemble the stage list from configuration, in dependency order:
/// merge, normalize, docs loading/transformation, page enrichment, sitemap,
/// save, sync. Sitemap and sync stages are present only when configured.
fn assemble_pipeline(config: &Config) -> Result<Pipeline, CliError> {
    let model_path = config.model_path()?;
    let store = ContentStore::new(&config.output_dir);
    let docs_base = model_path.parent().unwrap_or(Path::new(".")).to_path_buf();

    let mut pipeline = Pipeline::new()
        .with_task(MergeModels::new(model_path))
        .with_task(NormalizeModel)
        .with_task(LoadFromGithub::new(store.clone(), config.github.token.clone()))
        .with_task(LoadFromFile::new(store.clone(), docs_base))
        .with_task(TransformMarkdown::new(store.clone()))
        .with_task(CreateHeaderTitle::new(config.page.title_delimiter.clone()))
        .with_task(CreateHeaderMeta)
        .with_task(CreateBreadcrumbs)
        .with_task(CreateSearchMeta);

    if let Some(host) = &config.sitemap.host {
        pipeline = pipeline.with_task(CreateSitemap::new(store.clone(), host));
    }

    pipeline = pipeline.with_task(SaveModel::new(store));

    if let Some(sync) = &config.sync {
        pipeline = pipeline.with_task(SyncOutput::new(
            &config.output_dir,
            &sync.dest,
            sync.exclude.clone(),
        ));
    }

    Ok(pipeline)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn config_from(toml: &str) -> Config {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("kiln.toml");
        std::fs::write(&path, toml).unwrap();
        Config::load(&path).unwrap()
    }

    #[test]
    fn test_minimal_pipeline_order() {
        let config = config_from(r#"model_path = "model.json""#);

        let pipeline = assemble_pipeline(&config).unwrap();

        assert_eq!(
            pipeline.stage_names(),
            vec![
                "merge-models",
                "normalize-model",
                "load-from-github",
                "load-from-file",
                "transform-md-html",
                "header-title",
                "header-meta",
                "breadcrumbs",
                "search-meta",
                "save-model",
            ]
        );
    }

    #[test]
    fn test_full_pipeline_includes_sitemap_and_sync() {
        let config = config_from(
            r#"
model_path = "model.json"

[sitemap]
host = "https://docs.example.com"

[sync]
dest = "/srv/docs"
"#,
        );

        let pipeline = assemble_pipeline(&config).unwrap();
        let names = pipeline.stage_names();

        assert!(names.contains(&"sitemap-xml"));
        assert_eq!(names.last(), Some(&"sync-output"));
    }

    #[test]
    fn test_missing_model_path_fails() {
        let config = config_from(r#"output_dir = "build""#);

        assert!(assemble_pipeline(&config).is_err());
    }
}
