//! Resolved resources.
//!
//! A [`Resource`] is what a successful lookup hands back: a single file or
//! a directory on some storage backend, or an in-memory archive built from
//! a directory. Callers own the handle; nothing is cached.

use std::fmt;
use std::io::{self, Cursor, Read};
use std::path::Path;

use url::Url;

/// A resolved, byte-addressable artifact.
pub trait Resource: fmt::Debug + Send {
    /// Where the resource came from.
    fn url(&self) -> &Url;

    /// Check if the resource still exists.
    fn exists(&self) -> bool;

    /// Check if the resource can be read.
    fn is_readable(&self) -> bool;

    /// Check if the resource is a directory.
    fn is_dir(&self) -> bool {
        false
    }

    /// Base file name, if the resource has one.
    fn file_name(&self) -> Option<String>;

    /// Size in bytes of the resource content.
    fn content_length(&self) -> io::Result<u64>;

    /// Open the resource for streaming reads.
    fn open(&self) -> io::Result<Box<dyn Read + '_>>;

    /// Local path, for filesystem-backed resources.
    fn local_path(&self) -> Option<&Path> {
        None
    }

    /// Read the whole resource into memory.
    fn bytes(&self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.open()?.read_to_end(&mut buf)?;
        Ok(buf)
    }
}

/// Owned handle returned by a lookup.
pub type ResourceHandle = Box<dyn Resource>;

/// An archive built in memory from a resolved directory.
#[derive(Debug, Clone)]
pub struct ArchiveResource {
    /// URL of the directory the archive was built from
    url: Url,
    /// Archive bytes
    bytes: Vec<u8>,
}

impl ArchiveResource {
    pub fn new(url: Url, bytes: Vec<u8>) -> Self {
        ArchiveResource { url, bytes }
    }
}

impl Resource for ArchiveResource {
    fn url(&self) -> &Url {
        &self.url
    }

    fn exists(&self) -> bool {
        true
    }

    fn is_readable(&self) -> bool {
        true
    }

    fn file_name(&self) -> Option<String> {
        None
    }

    fn content_length(&self) -> io::Result<u64> {
        Ok(self.bytes.len() as u64)
    }

    fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(Cursor::new(&self.bytes)))
    }

    fn bytes(&self) -> io::Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}
