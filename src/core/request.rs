//! Lookup requests and the per-call search options.

use serde::{Deserialize, Serialize};

use crate::core::profile::ProfileSet;

/// A request for one named artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRequest {
    /// Application requesting configuration
    pub application: String,

    /// Comma-delimited profile list (e.g. `local,cloud`)
    pub profile: String,

    /// Version label (branch, tag) of the configuration source
    pub label: String,

    /// Relative path of the artifact
    pub path: String,

    /// Package a resolved directory into an archive
    pub archive: bool,
}

impl ResourceRequest {
    /// Create a request for a single file.
    pub fn new(
        application: impl Into<String>,
        profile: impl Into<String>,
        label: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        ResourceRequest {
            application: application.into(),
            profile: profile.into(),
            label: label.into(),
            path: path.into(),
            archive: false,
        }
    }

    /// Request that a resolved directory be returned as an archive.
    pub fn with_archive(mut self, archive: bool) -> Self {
        self.archive = archive;
        self
    }

    /// Parsed profile set.
    pub fn profiles(&self) -> ProfileSet {
        ProfileSet::parse(&self.profile)
    }
}

/// Search behaviour supplied by the hosting service on every call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Search locations last-to-first
    pub reverse_location_order: bool,
}

impl SearchOptions {
    pub fn reversed() -> Self {
        SearchOptions {
            reverse_location_order: true,
        }
    }
}
