//! Directory packaging.
//!
//! A resolved directory is packed into one ZIP archive. Entries are
//! flattened to their base file names, and the output is deterministic:
//! walk order is sorted by file name and every entry carries the same
//! timestamp and permissions.

use std::io::{self, BufReader, Cursor};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::core::Resource;
use crate::ops::errors::ResourceError;
use crate::storage::Storage;

/// Maximum directory depth descended into while packaging.
pub const MAX_PACK_DEPTH: usize = 10;

/// Read buffer used while streaming file contents into the archive.
const PACK_BUFFER_SIZE: usize = 8 * 1024;

/// Package every regular file under `dir` into a ZIP byte buffer.
///
/// Entry names are base names only. Two files with the same name in
/// different subdirectories both end up in the archive; on extraction
/// the later one (in walk order) wins.
pub fn pack_directory(
    storage: &dyn Storage,
    dir: &dyn Resource,
) -> Result<Vec<u8>, ResourceError> {
    let url = dir.url().to_string();

    if !dir.is_dir() {
        return Err(ResourceError::NotADirectory { url });
    }

    let packaging = |message: String| ResourceError::Packaging {
        url: url.clone(),
        message,
    };

    let files = storage
        .list_recursive(dir, MAX_PACK_DEPTH)
        .map_err(|e| packaging(e.to_string()))?;

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    for file in &files {
        let Some(name) = file.file_name() else {
            tracing::debug!("Skipping unnamed entry {}", file.url());
            continue;
        };

        let reader = file
            .open()
            .map_err(|e| packaging(format!("failed to open {}: {}", file.url(), e)))?;

        zip.start_file(name.as_str(), options)
            .map_err(|e| packaging(format!("failed to add {}: {}", name, e)))?;
        io::copy(
            &mut BufReader::with_capacity(PACK_BUFFER_SIZE, reader),
            &mut zip,
        )
        .map_err(|e| packaging(format!("failed to write {}: {}", name, e)))?;
    }

    tracing::debug!("Packed {} file(s) from {}", files.len(), url);

    let cursor = zip
        .finish()
        .map_err(|e| packaging(format!("failed to finish archive: {}", e)))?;
    Ok(cursor.into_inner())
}
