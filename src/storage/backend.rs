//! Storage trait - common interface for all storage backends.

use thiserror::Error;

use crate::core::{Location, Resource, ResourceHandle};

/// Outcome of probing one candidate under one location.
#[derive(Debug)]
pub enum Lookup {
    /// The candidate exists
    Found(ResourceHandle),
    /// Nothing at this candidate
    NotFound,
}

impl Lookup {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}

/// Error while talking to a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("location `{location}` is unavailable: {reason}")]
    Unavailable { location: String, reason: String },

    #[error("I/O error at `{target}`")]
    Io {
        target: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP error at `{url}`: {message}")]
    Http { url: String, message: String },

    #[error("`{operation}` is not supported by the {backend} backend")]
    Unsupported {
        backend: &'static str,
        operation: &'static str,
    },
}

/// A place resources can be resolved from.
pub trait Storage: Send + Sync {
    /// Get the backend name for display.
    fn name(&self) -> &str;

    /// URL schemes this backend serves (`file`, `https`, ...).
    fn schemes(&self) -> &'static [&'static str];

    /// Check if this backend can search the given location.
    fn supports(&self, location: &Location) -> bool {
        location
            .kind()
            .map(|kind| self.schemes().iter().any(|s| *s == kind.scheme()))
            .unwrap_or(false)
    }

    /// Resolve `candidate` relative to `location`.
    fn resolve_relative(&self, location: &Location, candidate: &str)
        -> Result<Lookup, StorageError>;

    /// List regular files under a directory handle, descending at most
    /// `max_depth` levels.
    fn list_recursive(
        &self,
        dir: &dyn Resource,
        max_depth: usize,
    ) -> Result<Vec<ResourceHandle>, StorageError>;
}
