//! Quay - configuration resource lookup with path-traversal hardening
//!
//! This crate resolves named resources (`app.yml`, `nginx.conf`, whole
//! directories) against an ordered list of search locations, preferring
//! profile-specific variants and refusing any request, location or match
//! that would escape its location.

pub mod core;
pub mod ops;
pub mod resolver;
pub mod storage;
pub mod util;

/// Test doubles for Quay unit tests.
///
/// Only available when compiling with `--cfg test`.
#[cfg(test)]
pub mod test_support;

pub use core::{
    location::Location, profile::ProfileSet, request::ResourceRequest, request::SearchOptions,
    resource::Resource, resource::ResourceHandle,
};

pub use ops::{ResourceError, ResourceLocator};
pub use util::context::GlobalContext;
