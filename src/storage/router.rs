//! Storage routing by location scheme.

use std::path::PathBuf;
use std::time::Duration;

use crate::core::{Location, Resource, ResourceHandle};
use crate::storage::{FileStorage, HttpStorage, Lookup, Storage, StorageError};

/// Dispatches each location to the backend that serves its scheme.
pub struct StorageRouter {
    /// Backends in registration order; the first match wins
    backends: Vec<Box<dyn Storage>>,
}

impl StorageRouter {
    /// Create an empty router.
    pub fn new() -> Self {
        StorageRouter {
            backends: Vec::new(),
        }
    }

    /// Router with the file and HTTP backends.
    pub fn with_defaults(
        cwd: impl Into<PathBuf>,
        http_timeout: Duration,
    ) -> Result<Self, StorageError> {
        Ok(StorageRouter::new()
            .with_backend(FileStorage::new(cwd))
            .with_backend(HttpStorage::new(http_timeout)?))
    }

    /// Register a backend.
    pub fn with_backend(mut self, backend: impl Storage + 'static) -> Self {
        self.backends.push(Box::new(backend));
        self
    }

    fn backend_for(&self, location: &Location) -> Result<&dyn Storage, StorageError> {
        self.backends
            .iter()
            .find(|b| b.supports(location))
            .map(|b| b.as_ref())
            .ok_or_else(|| StorageError::Unavailable {
                location: location.to_string(),
                reason: "no storage backend for this location".to_string(),
            })
    }
}

impl Default for StorageRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for StorageRouter {
    fn name(&self) -> &str {
        "router"
    }

    fn schemes(&self) -> &'static [&'static str] {
        &[]
    }

    fn supports(&self, location: &Location) -> bool {
        self.backends.iter().any(|b| b.supports(location))
    }

    fn resolve_relative(
        &self,
        location: &Location,
        candidate: &str,
    ) -> Result<Lookup, StorageError> {
        self.backend_for(location)?.resolve_relative(location, candidate)
    }

    fn list_recursive(
        &self,
        dir: &dyn Resource,
        max_depth: usize,
    ) -> Result<Vec<ResourceHandle>, StorageError> {
        let scheme = dir.url().scheme();
        let backend = self
            .backends
            .iter()
            .find(|b| b.schemes().iter().any(|s| *s == scheme))
            .ok_or(StorageError::Unsupported {
                backend: "router",
                operation: "listing a resource with an unknown scheme",
            })?;
        backend.list_recursive(dir, max_depth)
    }
}
