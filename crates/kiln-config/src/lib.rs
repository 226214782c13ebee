//! Configuration management for Kiln.
//!
//! Parses `kiln.toml` configuration files with serde. Every task receives
//! its options explicitly from this config; there is no process-wide
//! mutable state or implicit default folder.
//!
//! ## Environment Variable Expansion
//!
//! The `github.token` value supports environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! A token of `""` after expansion is treated as absent.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "kiln.toml";

/// Error raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<toml::de::Error>,
    },
    #[error("environment expansion failed for {field}: {message}")]
    Expand { field: String, message: String },
    #[error("missing required setting: {0}")]
    Missing(&'static str),
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Path to the declarative model JSON file.
    pub model_path: Option<PathBuf>,
    /// Output directory for `data.json`, content files and the sitemap.
    pub output_dir: PathBuf,
    /// Page enrichment options.
    pub page: PageConfig,
    /// Sitemap emission options.
    pub sitemap: SitemapConfig,
    /// GitHub fetch options.
    pub github: GithubConfig,
    /// Output synchronization options. Sync runs only when present.
    pub sync: Option<SyncConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_path: None,
            output_dir: PathBuf::from(".kiln/cache"),
            page: PageConfig::default(),
            sitemap: SitemapConfig::default(),
            github: GithubConfig::default(),
            sync: None,
        }
    }
}

/// Page enrichment configuration.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    /// Delimiter between ancestor titles in `header.title`.
    pub title_delimiter: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title_delimiter: " / ".to_owned(),
        }
    }
}

/// Sitemap configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SitemapConfig {
    /// Host prefix for absolute `<loc>` entries (e.g. `https://docs.example.com`).
    pub host: Option<String>,
}

/// GitHub fetch configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GithubConfig {
    /// Access token; supports `${VAR}` expansion.
    pub token: Option<String>,
}

/// Output synchronization configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyncConfig {
    /// Destination directory.
    pub dest: PathBuf,
    /// Glob patterns excluded from the sync.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

fn default_exclude() -> Vec<String> {
    ["*.meta.json", "model.json", "*.md"]
        .map(str::to_owned)
        .to_vec()
}

impl Config {
    /// Load configuration from an explicit file path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source: Box::new(source),
        })?;
        config.expand_env()?;
        Ok(config)
    }

    /// Discover `kiln.toml` in `start_dir` or its ancestors and load it.
    pub fn discover(start_dir: &Path) -> Result<Self, ConfigError> {
        let mut dir = Some(start_dir);
        while let Some(current) = dir {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Self::load(&candidate);
            }
            dir = current.parent();
        }
        Err(ConfigError::NotFound(start_dir.join(CONFIG_FILENAME)))
    }

    /// The model path, required for a build.
    pub fn model_path(&self) -> Result<&Path, ConfigError> {
        self.model_path
            .as_deref()
            .ok_or(ConfigError::Missing("model_path"))
    }

    /// Expand environment variables in string settings.
    fn expand_env(&mut self) -> Result<(), ConfigError> {
        if let Some(token) = self.github.token.take() {
            let expanded = shellexpand::env(&token)
                .map_err(|e| ConfigError::Expand {
                    field: "github.token".to_owned(),
                    message: e.to_string(),
                })?
                .into_owned();
            self.github.token = if expanded.is_empty() {
                None
            } else {
                Some(expanded)
            };
        }
        Ok(())
    }
}
