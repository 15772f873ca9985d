//! Configuration file support for Quay.
//!
//! Quay supports two configuration file locations:
//! - Global: `~/.quay/config.toml` - User-wide defaults
//! - Project: `.quay/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::SearchOptions;
use crate::resolver::search_path::DEFAULT_LABEL;

/// Quay configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Search settings
    pub search: SearchConfig,

    /// HTTP storage settings
    pub http: HttpConfig,
}

/// Where and how resources are searched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Location templates (`{application}`, `{profile}`, `{label}`)
    pub locations: Vec<String>,

    /// Search locations last-to-first
    pub reverse_location_order: Option<bool>,

    /// Abort when one member of a composite location resolver fails
    pub fail_on_composite_error: Option<bool>,

    /// Label used when a request has none
    pub default_label: Option<String>,

    /// Profile used when a request has none
    pub default_profile: Option<String>,
}

/// HTTP storage configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    ///
    /// A non-empty location list replaces the current one wholesale;
    /// location lists are ordered, so they are never interleaved.
    pub fn merge(&mut self, other: Config) {
        if !other.search.locations.is_empty() {
            self.search.locations = other.search.locations;
        }
        if other.search.reverse_location_order.is_some() {
            self.search.reverse_location_order = other.search.reverse_location_order;
        }
        if other.search.fail_on_composite_error.is_some() {
            self.search.fail_on_composite_error = other.search.fail_on_composite_error;
        }
        if other.search.default_label.is_some() {
            self.search.default_label = other.search.default_label;
        }
        if other.search.default_profile.is_some() {
            self.search.default_profile = other.search.default_profile;
        }

        if other.http.timeout_secs.is_some() {
            self.http.timeout_secs = other.http.timeout_secs;
        }
    }

    /// Per-call search options.
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            reverse_location_order: self.search.reverse_location_order.unwrap_or(false),
        }
    }

    pub fn fail_on_composite_error(&self) -> bool {
        self.search.fail_on_composite_error.unwrap_or(true)
    }

    pub fn default_label(&self) -> &str {
        self.search.default_label.as_deref().unwrap_or(DEFAULT_LABEL)
    }

    pub fn default_profile(&self) -> &str {
        self.search
            .default_profile
            .as_deref()
            .unwrap_or(crate::core::DEFAULT_PROFILE)
    }

    pub fn http_timeout(&self) -> Duration {
        self.http
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(crate::storage::http::DEFAULT_TIMEOUT)
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.quay/config.toml)
/// 2. Global config (~/.quay/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        if global_path.exists() {
            config.merge(Config::load_or_default(global_path));
        }
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Get the global quay config directory (~/.quay).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".quay"))
}

/// Get the global config path (~/.quay/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.quay/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".quay").join("config.toml")
}
