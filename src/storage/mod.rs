//! Storage backends.
//!
//! Backends resolve a candidate path under a search location to a
//! resource handle (local filesystem, HTTP object store) and list the
//! files below a resolved directory.

pub mod backend;
pub mod file;
pub mod http;
pub mod router;

pub use backend::{Lookup, Storage, StorageError};
pub use file::{FileResource, FileStorage};
pub use http::{HttpResource, HttpStorage};
pub use router::StorageRouter;
