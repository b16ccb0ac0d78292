// src/archive.rs

//! Entry extraction from downloaded jar/zip archives

use crate::error::{Error, Result};
use std::io::{Cursor, Read};
use tracing::debug;
use zip::ZipArchive;
use zip::result::ZipError;

/// Location of the Tiny v2 file inside a Yarn `mergedv2` jar
pub const MAPPINGS_ENTRY_PATH: &str = "mappings/mappings.tiny";

/// Maximum uncompressed size accepted for a single entry (512 MB).
pub const MAX_ENTRY_SIZE: u64 = 512 * 1024 * 1024;

/// Decompress a single entry from an in-memory zip archive
///
/// The archive bytes are consumed; the entry reader is dropped before
/// returning.
pub fn extract(archive: Vec<u8>, entry_path: &str) -> Result<Vec<u8>> {
    extract_with_limit(archive, entry_path, MAX_ENTRY_SIZE)
}

fn extract_with_limit(archive: Vec<u8>, entry_path: &str, limit: u64) -> Result<Vec<u8>> {
    let mut zip = ZipArchive::new(Cursor::new(archive))
        .map_err(|e| Error::ContainerFormat(e.to_string()))?;

    let mut entry = match zip.by_name(entry_path) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => {
            return Err(Error::EntryNotFound(entry_path.to_string()));
        }
        Err(e) => return Err(Error::ContainerFormat(e.to_string())),
    };

    let size = entry.size();
    if size > limit {
        return Err(too_large(entry_path, size));
    }

    let content = read_limited(&mut entry, entry_path, limit)?;
    drop(entry);

    debug!("Extracted {} ({} bytes)", entry_path, content.len());
    Ok(content)
}

/// Read at most `limit` bytes, failing if the reader has more
///
/// The declared entry size comes from the archive header and is not trusted.
fn read_limited<R: Read>(reader: R, entry_path: &str, limit: u64) -> Result<Vec<u8>> {
    let mut content = Vec::new();
    reader
        .take(limit.saturating_add(1))
        .read_to_end(&mut content)
        .map_err(|e| {
            Error::ContainerFormat(format!("Failed to decompress '{}': {}", entry_path, e))
        })?;

    if content.len() as u64 > limit {
        return Err(too_large(entry_path, content.len() as u64));
    }
    Ok(content)
}

fn too_large(entry_path: &str, size: u64) -> Error {
    Error::ContainerFormat(format!(
        "entry '{}' is too large ({} bytes)",
        entry_path, size
    ))
}
