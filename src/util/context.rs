//! Global context for Quay operations.
//!
//! Provides centralized access to configuration, paths, and the
//! resolver/storage stack a lookup runs against.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::ops::ResourceLocator;
use crate::resolver::{CompositeLocator, SearchPathLocator, StaticLocator};
use crate::storage::StorageRouter;
use crate::util::config::{self, Config};

/// Global context for Quay operations.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory; relative file locations anchor here
    cwd: PathBuf,

    /// Whether to use verbose output
    verbose: bool,

    /// Whether to use colors in output
    color: bool,

    /// Merged configuration
    config: Config,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;

        Ok(GlobalContext {
            cwd,
            verbose: false,
            color: true,
            config: Config::default(),
        })
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Result<Self> {
        let mut ctx = Self::new()?;
        ctx.cwd = cwd;
        Ok(ctx)
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Load the global and project configuration, then `explicit` on top.
    ///
    /// An explicit file must exist and parse; the implicit ones fall back
    /// to defaults.
    pub fn load_config(mut self, explicit: Option<&Path>) -> Result<Self> {
        let global = config::global_config_path();
        let mut merged =
            config::load_config(global.as_deref(), &config::project_config_path(&self.cwd));

        if let Some(path) = explicit {
            merged.merge(Config::load(path)?);
        }

        self.config = merged;
        Ok(self)
    }

    /// Set verbose mode.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Set color output.
    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the merged configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if color output is enabled.
    pub fn color(&self) -> bool {
        self.color
    }

    /// Build the location resolver for a command.
    ///
    /// Locations given on the command line are searched first, followed by
    /// the configured templates.
    pub fn location_resolver(&self, extra: &[String]) -> Result<CompositeLocator> {
        let templates = &self.config.search.locations;
        if extra.is_empty() && templates.is_empty() {
            bail!(
                "no search locations configured\n\
                 help: pass --location or set `search.locations` in .quay/config.toml"
            );
        }

        let mut resolver = CompositeLocator::new(self.config.fail_on_composite_error());
        if !extra.is_empty() {
            resolver = resolver.with_member(StaticLocator::new(extra.iter().cloned()));
        }
        if !templates.is_empty() {
            resolver = resolver.with_member(
                SearchPathLocator::new(templates.iter().cloned())
                    .with_default_label(self.config.default_label()),
            );
        }

        Ok(resolver)
    }

    /// Build the storage router with the file and HTTP backends.
    pub fn storage(&self) -> Result<StorageRouter> {
        StorageRouter::with_defaults(&self.cwd, self.config.http_timeout())
            .context("failed to initialize storage backends")
    }

    /// Build a resource locator over the configured resolver and storage.
    pub fn resource_locator(&self, extra: &[String]) -> Result<ResourceLocator> {
        Ok(ResourceLocator::new(
            self.location_resolver(extra)?,
            self.storage()?,
            &self.cwd,
        ))
    }
}
