//! High-level operations.
//!
//! Resource lookup, directory packaging, and the errors they report.

pub mod errors;
pub mod find_resource;
pub mod pack;

pub use errors::ResourceError;
pub use find_resource::ResourceLocator;
pub use pack::{pack_directory, MAX_PACK_DEPTH};
