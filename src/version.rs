// src/version.rs

//! Known mapping releases
//!
//! A [`VersionTable`] maps each accepted version identifier to the URL of its
//! Yarn `mergedv2` jar. The table is ordered: batch conversion walks it front
//! to back, and it doubles as the allow-list for single conversions.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Yarn releases converted when no table is configured
const DEFAULT_YARN_RELEASES: &[(&str, &str)] = &[
    (
        "1.20.4",
        "https://maven.fabricmc.net/net/fabricmc/yarn/1.20.4+build.3/yarn-1.20.4+build.3-mergedv2.jar",
    ),
    (
        "1.20.5",
        "https://maven.fabricmc.net/net/fabricmc/yarn/1.20.5+build.1/yarn-1.20.5+build.1-mergedv2.jar",
    ),
    (
        "1.20.6",
        "https://maven.fabricmc.net/net/fabricmc/yarn/1.20.6+build.3/yarn-1.20.6+build.3-mergedv2.jar",
    ),
    (
        "1.21",
        "https://maven.fabricmc.net/net/fabricmc/yarn/1.21+build.9/yarn-1.21+build.9-mergedv2.jar",
    ),
    (
        "1.21.1",
        "https://maven.fabricmc.net/net/fabricmc/yarn/1.21.1+build.3/yarn-1.21.1+build.3-mergedv2.jar",
    ),
    (
        "1.21.2",
        "https://maven.fabricmc.net/net/fabricmc/yarn/1.21.2+build.1/yarn-1.21.2+build.1-mergedv2.jar",
    ),
    (
        "1.21.3",
        "https://maven.fabricmc.net/net/fabricmc/yarn/1.21.3+build.2/yarn-1.21.3+build.2-mergedv2.jar",
    ),
    (
        "1.21.4",
        "https://maven.fabricmc.net/net/fabricmc/yarn/1.21.4+build.8/yarn-1.21.4+build.8-mergedv2.jar",
    ),
    (
        "1.21.5",
        "https://maven.fabricmc.net/net/fabricmc/yarn/1.21.5+build.1/yarn-1.21.5+build.1-mergedv2.jar",
    ),
];

/// One mapping release and where to download it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionEntry {
    /// Version identifier, e.g. `1.21.4`
    pub id: String,
    /// Location of the release archive
    pub url: String,
}

/// Ordered, read-only table of known releases
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionTable {
    entries: Vec<VersionEntry>,
}

impl VersionTable {
    /// Build a table from entries, rejecting empty or duplicate identifiers
    ///
    /// Identifiers double as output file names, so they must not contain
    /// path separators or be `.`/`..`.
    pub fn new(entries: Vec<VersionEntry>) -> Result<Self> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if entry.id.trim().is_empty() {
                return Err(Error::Config("version id must not be empty".to_string()));
            }
            if entry.id.contains(['/', '\\']) || entry.id == "." || entry.id == ".." {
                return Err(Error::Config(format!(
                    "version id '{}' is not a valid file name",
                    entry.id
                )));
            }
            if entry.url.trim().is_empty() {
                return Err(Error::Config(format!(
                    "version '{}' has an empty url",
                    entry.id
                )));
            }
            if !seen.insert(entry.id.as_str()) {
                return Err(Error::Config(format!(
                    "version '{}' is listed more than once",
                    entry.id
                )));
            }
        }

        Ok(Self { entries })
    }

    /// The built-in Yarn release table
    pub fn yarn_defaults() -> Self {
        Self {
            entries: DEFAULT_YARN_RELEASES
                .iter()
                .map(|(id, url)| VersionEntry {
                    id: (*id).to_string(),
                    url: (*url).to_string(),
                })
                .collect(),
        }
    }

    /// Location for a version, if it is known
    pub fn location(&self, version: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.id == version)
            .map(|e| e.url.as_str())
    }

    /// Check whether a version is on the allow-list
    pub fn contains(&self, version: &str) -> bool {
        self.location(version).is_some()
    }

    /// Version identifiers in table order
    pub fn versions(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.id.as_str())
    }

    pub fn entries(&self) -> &[VersionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for VersionTable {
    fn default() -> Self {
        Self::yarn_defaults()
    }
}

impl fmt::Display for VersionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.id, self.url)
    }
}
