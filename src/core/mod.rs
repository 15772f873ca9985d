//! Core data structures for Quay.
//!
//! This module contains the foundational types used throughout Quay:
//! - Search locations and location lists
//! - Profile sets and profile-specific path candidates
//! - Lookup requests and search options
//! - Resolved resource handles

pub mod location;
pub mod profile;
pub mod request;
pub mod resource;

pub use location::{Location, LocationKind, LocationList, OPTIONAL_PREFIX};
pub use profile::{profile_paths, ProfileSet, DEFAULT_PROFILE};
pub use request::{ResourceRequest, SearchOptions};
pub use resource::{ArchiveResource, Resource, ResourceHandle};
