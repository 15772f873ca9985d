//! Test doubles for Quay unit tests.
//!
//! Storage and resolver mocks that record or fail on demand, so lookup
//! ordering and error propagation can be asserted without a network.
//!
//! # Example
//!
//! ```rust,ignore
//! use quay::test_support::{RecordingStorage, write_file};
//!
//! #[test]
//! fn test_example() {
//!     let tmp = tempfile::TempDir::new().unwrap();
//!     write_file(tmp.path(), "config/app.yml", "a: 1");
//!
//!     let storage = RecordingStorage::new(FileStorage::new(tmp.path()));
//!     // Hand a clone to the locator, then inspect storage.lookups()
//! }
//! ```

pub mod fixtures;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{bail, Result};

use crate::core::{Location, LocationList, Resource, ResourceHandle};
use crate::resolver::LocationResolver;
use crate::storage::{FileResource, FileStorage, Lookup, Storage, StorageError};

pub use fixtures::*;

/// Storage wrapper that records every lookup before delegating.
///
/// Clones share the same lookup log.
#[derive(Clone)]
pub struct RecordingStorage {
    inner: Arc<FileStorage>,
    lookups: Arc<Mutex<Vec<(String, String)>>>,
}

impl RecordingStorage {
    pub fn new(inner: FileStorage) -> Self {
        RecordingStorage {
            inner: Arc::new(inner),
            lookups: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get the recorded `(location, candidate)` pairs, in lookup order.
    pub fn lookups(&self) -> Vec<(String, String)> {
        self.lookups.lock().unwrap().clone()
    }
}

impl Storage for RecordingStorage {
    fn name(&self) -> &str {
        "recording"
    }

    fn schemes(&self) -> &'static [&'static str] {
        self.inner.schemes()
    }

    fn resolve_relative(
        &self,
        location: &Location,
        candidate: &str,
    ) -> Result<Lookup, StorageError> {
        self.lookups
            .lock()
            .unwrap()
            .push((location.as_str().to_string(), candidate.to_string()));
        self.inner.resolve_relative(location, candidate)
    }

    fn list_recursive(
        &self,
        dir: &dyn Resource,
        max_depth: usize,
    ) -> Result<Vec<ResourceHandle>, StorageError> {
        self.inner.list_recursive(dir, max_depth)
    }
}

/// File storage that fails with an I/O error for one location.
pub struct FailingStorage {
    failing: String,
    inner: FileStorage,
}

impl FailingStorage {
    pub fn new(failing: &str, cwd: impl Into<PathBuf>) -> Self {
        FailingStorage {
            failing: failing.to_string(),
            inner: FileStorage::new(cwd),
        }
    }
}

impl Storage for FailingStorage {
    fn name(&self) -> &str {
        "failing"
    }

    fn schemes(&self) -> &'static [&'static str] {
        self.inner.schemes()
    }

    fn resolve_relative(
        &self,
        location: &Location,
        candidate: &str,
    ) -> Result<Lookup, StorageError> {
        if location.as_str() == self.failing {
            return Err(StorageError::Io {
                target: format!("{}/{}", location.as_str(), candidate),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "mock failure"),
            });
        }
        self.inner.resolve_relative(location, candidate)
    }

    fn list_recursive(
        &self,
        dir: &dyn Resource,
        max_depth: usize,
    ) -> Result<Vec<ResourceHandle>, StorageError> {
        self.inner.list_recursive(dir, max_depth)
    }
}

/// Storage that resolves every candidate to one fixed file, wherever it is.
pub struct EscapingStorage {
    target: PathBuf,
}

impl EscapingStorage {
    pub fn new(target: PathBuf) -> Self {
        EscapingStorage { target }
    }
}

impl Storage for EscapingStorage {
    fn name(&self) -> &str {
        "escaping"
    }

    fn schemes(&self) -> &'static [&'static str] {
        &["file"]
    }

    fn resolve_relative(
        &self,
        _location: &Location,
        _candidate: &str,
    ) -> Result<Lookup, StorageError> {
        let resource = FileResource::new(self.target.clone(), false)?;
        Ok(Lookup::Found(Box::new(resource)))
    }

    fn list_recursive(
        &self,
        _dir: &dyn Resource,
        _max_depth: usize,
    ) -> Result<Vec<ResourceHandle>, StorageError> {
        Ok(Vec::new())
    }
}

/// Resolver that must never be consulted.
pub struct PanickingLocator;

impl LocationResolver for PanickingLocator {
    fn locations(&self, application: &str, _profile: &str, _label: &str) -> Result<LocationList> {
        panic!("locations requested for `{}`", application)
    }
}

/// Resolver that always fails.
pub struct FailingLocator;

impl LocationResolver for FailingLocator {
    fn locations(&self, application: &str, _profile: &str, _label: &str) -> Result<LocationList> {
        bail!("no environment repository for `{}`", application)
    }
}

/// Resolver that lingers inside `locations` and records how many calls
/// overlapped.
///
/// Clones share the counters.
#[derive(Clone)]
pub struct SlowLocator {
    locations: Vec<String>,
    delay: Duration,
    in_flight: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

impl SlowLocator {
    pub fn new<I, S>(locations: I, delay: Duration) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SlowLocator {
            locations: locations.into_iter().map(Into::into).collect(),
            delay,
            in_flight: Arc::new(AtomicUsize::new(0)),
            peak: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Highest number of `locations` calls seen running at once.
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl LocationResolver for SlowLocator {
    fn locations(&self, _application: &str, _profile: &str, _label: &str) -> Result<LocationList> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        std::thread::sleep(self.delay);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        Ok(self.locations.iter().map(|l| Location::parse(l)).collect())
    }
}

/// Path of `rel` under `root`, for assertions.
pub fn under(root: &Path, rel: &str) -> PathBuf {
    rel.split('/').fold(root.to_path_buf(), |acc, part| acc.join(part))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_recording_storage_shares_lookups() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "config/app.yml", "a: 1");

        let storage = RecordingStorage::new(FileStorage::new(tmp.path()));
        let clone = storage.clone();
        let lookup = clone
            .resolve_relative(&Location::parse("config"), "app.yml")
            .unwrap();

        assert!(lookup.is_found());
        assert_eq!(
            storage.lookups(),
            vec![("config".to_string(), "app.yml".to_string())]
        );
    }

    #[test]
    fn test_failing_storage_only_fails_its_location() {
        let tmp = TempDir::new().unwrap();
        let storage = FailingStorage::new("broken", tmp.path());

        assert!(storage
            .resolve_relative(&Location::parse("broken"), "app.yml")
            .is_err());
        assert!(storage
            .resolve_relative(&Location::parse("fine"), "app.yml")
            .is_ok());
    }

    #[test]
    fn test_slow_locator_counts_overlap() {
        let locator = SlowLocator::new(["config"], Duration::from_millis(200));
        let start = Arc::new(std::sync::Barrier::new(2));
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let locator = locator.clone();
                let start = start.clone();
                std::thread::spawn(move || {
                    start.wait();
                    locator.locations("app", "default", "main").unwrap()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().len(), 1);
        }

        // Unsynchronized callers overlap.
        assert_eq!(locator.peak(), 2);
    }

    #[test]
    fn test_under_joins_segments() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(
            under(tmp.path(), "a/b.txt"),
            tmp.path().join("a").join("b.txt")
        );
    }
}
