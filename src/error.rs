// src/error.rs

//! Error types for the mapping conversion pipeline

use thiserror::Error;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting a mapping release
#[derive(Error, Debug)]
pub enum Error {
    /// Remote archive could not be retrieved
    #[error("Transport error: {0}")]
    Transport(String),

    /// Downloaded bytes are not a readable zip container
    #[error("Invalid archive: {0}")]
    ContainerFormat(String),

    /// Expected entry is missing from the archive
    #[error("Entry '{0}' not found in archive")]
    EntryNotFound(String),

    /// Mapping file contained one or more malformed lines
    #[error("Failed to parse mappings:\n{0}")]
    Parse(String),

    /// Version is not present in the version table
    #[error("Unknown mapping version: {0}")]
    UnknownVersion(String),

    /// A batch conversion stopped at the given version
    #[error("Conversion of version {version} failed after {converted} successful conversions: {source}")]
    Batch {
        version: String,
        converted: usize,
        #[source]
        source: Box<Error>,
    },

    /// Configuration file could not be loaded or is inconsistent
    #[error("Configuration error: {0}")]
    Config(String),

    /// Local I/O failure (writing outputs, reading files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Version that aborted a batch, if this is a batch failure
    pub fn failed_version(&self) -> Option<&str> {
        match self {
            Self::Batch { version, .. } => Some(version),
            _ => None,
        }
    }

    /// Innermost step error, unwrapping batch context
    pub fn root(&self) -> &Error {
        match self {
            Self::Batch { source, .. } => source.root(),
            other => other,
        }
    }
}
