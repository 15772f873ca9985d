//! Resource lookup across ordered search locations.
//!
//! The search walks `locations x candidates` in order and stops at the
//! first match. It is a lookup, not a merge: the most specific location
//! that has any matching candidate wins outright.
//!
//! ```text
//! locations  = [L1, L2]            (reversed when configured)
//! candidates = [app-local.yml, app.yml]
//!
//! L1/app-local.yml -> L1/app.yml -> L2/app-local.yml -> L2/app.yml
//! ```

use std::path::PathBuf;
use std::sync::Mutex;

use url::Url;

use crate::core::{
    profile_paths, ArchiveResource, Location, ResourceHandle, ResourceRequest, SearchOptions,
};
use crate::ops::errors::ResourceError;
use crate::ops::pack::pack_directory;
use crate::resolver::LocationResolver;
use crate::storage::{Lookup, Storage, StorageError};
use crate::util::path_safety::{is_unsafe_location, is_unsafe_path, is_within};

/// Finds resources for requests against one location resolver and one
/// storage backend.
///
/// Lookups on one locator are serialized: at most one `resolve` (including
/// any packaging it triggers) runs at a time. Separate locators run
/// independently.
pub struct ResourceLocator {
    locator: Box<dyn LocationResolver>,
    storage: Box<dyn Storage>,
    /// Directory relative file locations are anchored at
    cwd: PathBuf,
    lock: Mutex<()>,
}

/// A search location that passed the safety checks.
struct SearchRoot {
    location: Location,
    base: Url,
}

impl ResourceLocator {
    pub fn new(
        locator: impl LocationResolver + 'static,
        storage: impl Storage + 'static,
        cwd: impl Into<PathBuf>,
    ) -> Self {
        ResourceLocator {
            locator: Box::new(locator),
            storage: Box::new(storage),
            cwd: cwd.into(),
            lock: Mutex::new(()),
        }
    }

    /// Resolve a request to a resource handle.
    ///
    /// A resolved directory is returned as-is unless the request asks for
    /// an archive; archive requests that resolve to a single file get the
    /// file back unpackaged.
    pub fn resolve(
        &self,
        request: &ResourceRequest,
        options: &SearchOptions,
    ) -> Result<ResourceHandle, ResourceError> {
        if request.path.trim().is_empty() {
            return Err(ResourceError::InvalidPath {
                path: request.path.clone(),
                reason: "path is empty",
            });
        }
        if is_unsafe_path(&request.path) {
            return Err(ResourceError::InvalidPath {
                path: request.path.clone(),
                reason: "path escapes its search location",
            });
        }

        // A poisoned lock only means an earlier lookup panicked; the guard
        // protects no data.
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut locations = self
            .locator
            .locations(&request.application, &request.profile, &request.label)
            .map_err(|e| ResourceError::Locations {
                application: request.application.clone(),
                message: format!("{:#}", e),
            })?;

        if options.reverse_location_order {
            locations.reverse();
        }

        let roots = self.search_roots(locations, &request.path)?;
        let candidates = profile_paths(&request.path, &request.profiles());

        let resource = match self.search(&roots, &candidates, &request.path)? {
            Some(resource) => resource,
            None => {
                return Err(ResourceError::NotFound {
                    path: request.path.clone(),
                    searched: roots.iter().map(|r| r.location.to_string()).collect(),
                })
            }
        };

        if request.archive && resource.is_dir() {
            let bytes = pack_directory(self.storage.as_ref(), resource.as_ref())?;
            return Ok(Box::new(ArchiveResource::new(resource.url().clone(), bytes)));
        }

        Ok(resource)
    }

    /// Drop unsafe locations and anchor the rest.
    fn search_roots(
        &self,
        locations: impl IntoIterator<Item = Location>,
        path: &str,
    ) -> Result<Vec<SearchRoot>, ResourceError> {
        let mut roots = Vec::new();

        for location in locations {
            if is_unsafe_location(location.as_str()) {
                tracing::warn!("Skipping unsafe location: {}", location);
                continue;
            }

            match location.base_url(&self.cwd) {
                Ok(base) => roots.push(SearchRoot { location, base }),
                Err(e) if location.is_optional() => {
                    tracing::debug!("Skipping optional location {}: {:#}", location, e);
                }
                Err(e) => {
                    return Err(ResourceError::Resolution {
                        path: path.to_string(),
                        location: location.to_string(),
                        source: StorageError::Unavailable {
                            location: location.to_string(),
                            reason: format!("{:#}", e),
                        },
                    })
                }
            }
        }

        Ok(roots)
    }

    /// Try each candidate under each root; first match wins.
    fn search(
        &self,
        roots: &[SearchRoot],
        candidates: &[String],
        path: &str,
    ) -> Result<Option<ResourceHandle>, ResourceError> {
        'roots: for root in roots {
            for candidate in candidates {
                if is_unsafe_path(candidate) {
                    tracing::warn!("Skipping unsafe candidate `{}`", candidate);
                    continue;
                }

                match self.storage.resolve_relative(&root.location, candidate) {
                    Ok(Lookup::Found(resource)) => {
                        if !is_within(&root.base, resource.url()) {
                            tracing::warn!(
                                "Rejecting `{}`: {} is outside {}",
                                candidate,
                                resource.url(),
                                root.base
                            );
                            continue;
                        }
                        tracing::debug!("Found `{}` in {}", candidate, root.location);
                        return Ok(Some(resource));
                    }
                    Ok(Lookup::NotFound) => {}
                    Err(e) if root.location.is_optional() => {
                        tracing::debug!(
                            "Skipping optional location {}: {}",
                            root.location,
                            e
                        );
                        continue 'roots;
                    }
                    Err(source) => {
                        return Err(ResourceError::Resolution {
                            path: path.to_string(),
                            location: root.location.to_string(),
                            source,
                        })
                    }
                }
            }
        }

        Ok(None)
    }
}
