//! File storage - resources on the local filesystem.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use url::Url;
use walkdir::WalkDir;

use crate::core::{Location, LocationKind, Resource, ResourceHandle};
use crate::storage::{Lookup, Storage, StorageError};
use crate::util::path_safety::normalize_relative;

/// Storage for `file:` and bare-path locations.
#[derive(Debug, Clone)]
pub struct FileStorage {
    /// Directory relative locations are anchored at
    cwd: PathBuf,
}

impl FileStorage {
    /// Create a file storage anchoring relative locations at `cwd`.
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        FileStorage { cwd: cwd.into() }
    }

    /// Absolute base directory for a location.
    fn base_dir(&self, location: &Location) -> Result<PathBuf, StorageError> {
        match location.kind() {
            Ok(LocationKind::File(path)) if path.is_absolute() => Ok(path),
            Ok(LocationKind::File(path)) => Ok(self.cwd.join(path)),
            Ok(LocationKind::Http(_)) => Err(StorageError::Unsupported {
                backend: "file",
                operation: "http location",
            }),
            Err(e) => Err(StorageError::Unavailable {
                location: location.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

impl Storage for FileStorage {
    fn name(&self) -> &str {
        "file"
    }

    fn schemes(&self) -> &'static [&'static str] {
        &["file"]
    }

    fn resolve_relative(
        &self,
        location: &Location,
        candidate: &str,
    ) -> Result<Lookup, StorageError> {
        let base = self.base_dir(location)?;

        match fs::metadata(&base) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                return Err(StorageError::Unavailable {
                    location: location.to_string(),
                    reason: "not a directory".to_string(),
                })
            }
            Err(e) if is_missing(&e) => return Ok(Lookup::NotFound),
            Err(source) => {
                return Err(StorageError::Io {
                    target: base.display().to_string(),
                    source,
                })
            }
        }

        // Candidates are always relative to the base.
        let trimmed = candidate.trim_start_matches(['/', '\\']);
        let Some(relative) = normalize_relative(Path::new(trimmed)) else {
            tracing::debug!("Skipping candidate `{}` that climbs out of {}", candidate, location);
            return Ok(Lookup::NotFound);
        };
        let path = base.join(relative);

        match fs::metadata(&path) {
            Ok(meta) => {
                let resource = FileResource::new(path, meta.is_dir())?;
                Ok(Lookup::Found(Box::new(resource)))
            }
            Err(e) if is_missing(&e) => Ok(Lookup::NotFound),
            Err(source) => Err(StorageError::Io {
                target: path.display().to_string(),
                source,
            }),
        }
    }

    fn list_recursive(
        &self,
        dir: &dyn Resource,
        max_depth: usize,
    ) -> Result<Vec<ResourceHandle>, StorageError> {
        let root = dir.local_path().ok_or(StorageError::Unsupported {
            backend: "file",
            operation: "listing a non-local resource",
        })?;

        let mut files: Vec<ResourceHandle> = Vec::new();

        for entry in WalkDir::new(root)
            .max_depth(max_depth)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| StorageError::Io {
                target: e
                    .path()
                    .unwrap_or(root)
                    .display()
                    .to_string(),
                source: e.into(),
            })?;

            // Symlinks are not followed, so only real files are packaged.
            if entry.file_type().is_file() {
                files.push(Box::new(FileResource::new(entry.into_path(), false)?));
            }
        }

        Ok(files)
    }
}

fn is_missing(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}

/// A file or directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileResource {
    path: PathBuf,
    url: Url,
    dir: bool,
}

impl FileResource {
    /// Create a resource for an absolute path.
    pub fn new(path: PathBuf, dir: bool) -> Result<Self, StorageError> {
        let url = if dir {
            Url::from_directory_path(&path)
        } else {
            Url::from_file_path(&path)
        }
        .map_err(|_| StorageError::Unavailable {
            location: path.display().to_string(),
            reason: "path is not absolute".to_string(),
        })?;

        Ok(FileResource { path, url, dir })
    }
}

impl Resource for FileResource {
    fn url(&self) -> &Url {
        &self.url
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn is_readable(&self) -> bool {
        if self.dir {
            fs::read_dir(&self.path).is_ok()
        } else {
            File::open(&self.path).is_ok()
        }
    }

    fn is_dir(&self) -> bool {
        self.dir
    }

    fn file_name(&self) -> Option<String> {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
    }

    fn content_length(&self) -> io::Result<u64> {
        fs::metadata(&self.path).map(|meta| meta.len())
    }

    fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        if self.dir {
            return Err(io::Error::other(format!(
                "{} is a directory",
                self.path.display()
            )));
        }
        Ok(Box::new(File::open(&self.path)?))
    }

    fn local_path(&self) -> Option<&Path> {
        Some(&self.path)
    }
}
