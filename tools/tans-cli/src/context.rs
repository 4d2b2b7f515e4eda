//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use tans_commerce::catalog::Catalog;
use tans_commerce::config::StorefrontConfig;

use crate::output::Output;

/// Config file names searched for, in order.
pub const CONFIG_NAMES: [&str; 3] = ["tans.toml", ".tans.toml", "tans.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// Storefront configuration, with environment overrides applied.
    pub config: StorefrontConfig,
    /// Where the config came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Product range.
    pub catalog: Catalog,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load config and catalog.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (mut config, config_path) = match config_path {
            Some(path) => {
                let path = resolve(&cwd, path);
                let config = StorefrontConfig::load(&path)?;
                (config, Some(path))
            }
            None => match find_config(&cwd) {
                Some(path) => (StorefrontConfig::load(&path)?, Some(path)),
                None => (StorefrontConfig::default(), None),
            },
        };
        config.apply_env();

        match &config_path {
            Some(path) => output.debug(&format!("Using config {}", path.display())),
            None => output.debug("No config file found; using defaults"),
        }

        let catalog = match &config.store.catalog_path {
            Some(path) => {
                let base = config_path
                    .as_deref()
                    .and_then(Path::parent)
                    .unwrap_or(&cwd);
                let path = resolve(base, &path.to_string_lossy());
                Catalog::load(&path, config.store.currency)
                    .with_context(|| format!("Failed to load catalog {}", path.display()))?
            }
            None => Catalog::builtin_in(config.store.currency),
        };

        Ok(Self {
            config,
            config_path,
            catalog,
            output,
            cwd,
        })
    }
}

/// Find a config file in the directory tree.
fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_NAMES {
            let config_path = current.join(name);
            if config_path.exists() {
                return Some(config_path);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Resolve a path relative to `base`.
fn resolve(base: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}
