//! Site configuration management for `siterev.toml`.
//!
//! # Sections
//!
//! | Section              | Purpose                                        |
//! |----------------------|------------------------------------------------|
//! | `[base]`             | Site metadata for templates (url, analytics)   |
//! | `[build]`            | Output layout, manifest name, path prefix      |
//! | `[assets.<category>]`| Per-category source, manifest override, refs   |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "My Site"
//! url = "https://example.com"
//!
//! [build]
//! output = "public"
//!
//! [assets.css]
//! source = "build/css"
//! refs = ["main.css"]
//!
//! [assets.js]
//! refs = ["main.js"]
//! ```
//!
//! The loaded config is immutable for the rest of the run: CLI flags and
//! `SITEREV_*` environment variables are folded in once, in `main`.

mod assets;
mod base;
mod build;
pub mod defaults;
mod error;
pub mod paths;

pub use assets::AssetConfig;
pub use base::{BaseConfig, ENV_PREFIX};
pub use build::BuildConfig;
pub use error::ConfigError;

use crate::cli::{Cli, Commands, DEFAULT_CONFIG};
use paths::PathResolver;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Component, Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing siterev.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Site metadata
    #[serde(default)]
    pub base: BaseConfig,

    /// Output layout
    #[serde(default)]
    pub build: BuildConfig,

    /// Asset categories, keyed by category name
    #[serde(default)]
    pub assets: BTreeMap<String, AssetConfig>,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let mut config = Self::from_str(&content)?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    /// Load the config named by `-C` under the root, then fold in CLI flags.
    ///
    /// Only the default `siterev.toml` may be absent, in which case the
    /// conventional layout applies. A missing file named explicitly is an error.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let path = root.join(&cli.config);

        let mut config = if path.exists() {
            Self::from_path(&path)?
        } else if cli.config == Path::new(DEFAULT_CONFIG) {
            Self::default()
        } else {
            return Err(ConfigError::NotFound(path));
        };
        config.update_with_cli(cli);
        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Path helpers for the configured output root and prefix.
    pub fn paths(&self) -> PathResolver<'_> {
        PathResolver::new(&self.build.output, &self.build.path_prefix)
    }

    /// Location of the template context file.
    pub fn context_path(&self) -> PathBuf {
        self.paths().output_dir().join(&self.build.data).join("site.json")
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());

        Self::update_option(&mut self.build.output, cli.output.as_ref());
        Self::update_option(&mut self.build.path_prefix, cli.path_prefix.as_ref());

        if let Commands::Rev {
            category,
            source: Some(source),
        } = &cli.command
        {
            self.assets.entry(category.clone()).or_default().source = Some(source.clone());
        }

        self.update_path_with_root(&root);
        self.config_path = Self::normalize_path(&self.get_root().join(&cli.config));
    }

    /// Fold `SITEREV_*` overrides into `[base]`.
    pub fn update_with_env<I>(&mut self, vars: I) -> usize
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.base.update_with_env(vars)
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path) {
        let root = Self::normalize_path(&Self::expand_tilde(root));
        self.set_root(&root);

        self.build.output = Self::normalize_path(&root.join(Self::expand_tilde(&self.build.output)));

        for asset in self.assets.values_mut() {
            if let Some(source) = asset.source.as_ref() {
                asset.source = Some(Self::normalize_path(&root.join(Self::expand_tilde(source))));
            }
            if let Some(manifest) = asset.manifest.as_ref() {
                asset.manifest =
                    Some(Self::normalize_path(&root.join(Self::expand_tilde(manifest))));
            }
        }
    }

    /// Expand a leading `~` to the home directory.
    fn expand_tilde(path: &Path) -> PathBuf {
        match path.to_str() {
            Some(s) => PathBuf::from(shellexpand::tilde(s).into_owned()),
            None => path.to_path_buf(),
        }
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_single_component(&self.build.manifest) {
            return Err(ConfigError::Validation(
                "[build.manifest] must be a plain file name".into(),
            ));
        }

        if !is_relative_subpath(&self.build.path_prefix) {
            return Err(ConfigError::Validation(
                "[build.path_prefix] must be a relative path without `..`".into(),
            ));
        }

        if self.build.data.as_os_str().is_empty() || !is_relative_subpath(&self.build.data) {
            return Err(ConfigError::Validation(
                "[build.data] must be a relative path without `..`".into(),
            ));
        }

        if let Some(url) = &self.base.url
            && !url.starts_with("http")
        {
            return Err(ConfigError::Validation(
                "[base.url] must start with http:// or https://".into(),
            ));
        }

        for (category, asset) in &self.assets {
            if !is_single_component(category) {
                return Err(ConfigError::Validation(format!(
                    "[assets.{category}] must be named after a single directory"
                )));
            }
            if let Some(name) = asset.refs.iter().find(|name| name.trim().is_empty()) {
                return Err(ConfigError::Validation(format!(
                    "[assets.{category}.refs] contains an empty name: {name:?}"
                )));
            }
        }

        Ok(())
    }
}

/// Exactly one normal path component (`css`, `rev-manifest.json`).
fn is_single_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Relative path made only of normal components (empty allowed).
fn is_relative_subpath(path: &Path) -> bool {
    path.components().all(|c| matches!(c, Component::Normal(_)))
}

// ============================================================================
// Tests
// ============================================================================
