//! Location resolution.
//!
//! A [`LocationResolver`] turns `(application, profile, label)` into the
//! ordered list of places a resource is searched in. Resolvers always
//! return a fresh, owned list.

pub mod composite;
pub mod search_path;

pub use composite::CompositeLocator;
pub use search_path::SearchPathLocator;

use anyhow::Result;

use crate::core::{Location, LocationList};

/// Source of search locations for a request.
pub trait LocationResolver: Send + Sync {
    /// Get the ordered search locations, most specific first.
    fn locations(&self, application: &str, profile: &str, label: &str) -> Result<LocationList>;
}

/// A fixed list of locations, independent of the request.
#[derive(Debug, Clone, Default)]
pub struct StaticLocator {
    locations: LocationList,
}

impl StaticLocator {
    pub fn new(locations: impl IntoIterator<Item = impl Into<Location>>) -> Self {
        StaticLocator {
            locations: locations.into_iter().map(Into::into).collect(),
        }
    }
}

impl LocationResolver for StaticLocator {
    fn locations(&self, _application: &str, _profile: &str, _label: &str) -> Result<LocationList> {
        Ok(self.locations.clone())
    }
}

impl<T: LocationResolver + ?Sized> LocationResolver for Box<T> {
    fn locations(&self, application: &str, profile: &str, label: &str) -> Result<LocationList> {
        (**self).locations(application, profile, label)
    }
}
