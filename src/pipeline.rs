// src/pipeline.rs

//! Conversion pipeline
//!
//! For one version the steps run strictly in order:
//!
//! ```text
//! version -> location -> archive bytes -> mappings.tiny -> document -> output
//! ```
//!
//! The first failing step ends the conversion; nothing is produced for that
//! version. Batch conversion walks the version table in order and stops at
//! the first version that fails.

use crate::archive;
use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::fetch::{ArchiveFetcher, HttpFetcher};
use crate::progress::{ProgressTracker, SilentProgress};
use crate::projection::{OutputBuffer, project};
use crate::tiny;
use crate::version::VersionTable;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Destination for outputs produced during a batch run
pub trait OutputSink {
    /// Take ownership of the output for `version`
    fn accept(&mut self, version: &str, output: OutputBuffer) -> Result<()>;
}

/// Sink that drops every output
#[derive(Debug, Default)]
pub struct DiscardSink;

impl OutputSink for DiscardSink {
    fn accept(&mut self, version: &str, output: OutputBuffer) -> Result<()> {
        debug!("Discarding {} lines for {}", output.line_count(), version);
        Ok(())
    }
}

/// Sink writing each output to `<dir>/<version>`
#[derive(Debug)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Create the sink, creating `dir` if needed
    pub fn new(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }
}

impl OutputSink for DirectorySink {
    fn accept(&mut self, version: &str, output: OutputBuffer) -> Result<()> {
        let path = self.dir.join(version);
        output.write_to(&path)?;
        info!("Wrote {} ({} lines)", path.display(), output.line_count());
        Ok(())
    }
}

/// Orchestrates fetch, extraction, parsing and projection
pub struct MappingPipeline<F> {
    table: VersionTable,
    fetcher: F,
    entry_path: String,
}

impl MappingPipeline<HttpFetcher> {
    /// Build an HTTP-backed pipeline from configuration
    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        config.validate()?;
        let table = config.version_table()?;
        let fetcher = HttpFetcher::new(config.timeout())?;
        Ok(Self::new(table, fetcher).with_entry_path(config.entry_path.clone()))
    }
}

impl<F: ArchiveFetcher> MappingPipeline<F> {
    /// Create a pipeline over an injected version table
    pub fn new(table: VersionTable, fetcher: F) -> Self {
        Self {
            table,
            fetcher,
            entry_path: archive::MAPPINGS_ENTRY_PATH.to_string(),
        }
    }

    /// Override the archive entry holding the mapping file
    pub fn with_entry_path(mut self, entry_path: impl Into<String>) -> Self {
        self.entry_path = entry_path.into();
        self
    }

    pub fn table(&self) -> &VersionTable {
        &self.table
    }

    pub fn entry_path(&self) -> &str {
        &self.entry_path
    }

    /// Convert a single version
    pub fn convert_one(&self, version: &str) -> Result<OutputBuffer> {
        let location = self
            .table
            .location(version)
            .ok_or_else(|| Error::UnknownVersion(version.to_string()))?;

        info!("Converting mappings for {}", version);

        let raw = self.fetcher.fetch(location)?;
        let entry = archive::extract(raw, &self.entry_path)?;
        let document = tiny::parse_document(&entry)?;
        drop(entry);

        debug!(
            "Parsed {} classes and {} members for {}",
            document.classes.len(),
            document.member_count(),
            version
        );

        let output = project(&document);
        info!("Converted {} ({} lines)", version, output.line_count());
        Ok(output)
    }

    /// Convert every known version, discarding the outputs
    pub fn convert_all(&self) -> Result<usize> {
        self.convert_all_with(&mut DiscardSink, &SilentProgress::new())
    }

    /// Convert every known version in table order
    ///
    /// Stops at the first failure, which is returned as [`Error::Batch`]
    /// naming the version. Versions after it are not attempted.
    pub fn convert_all_with(
        &self,
        sink: &mut dyn OutputSink,
        progress: &dyn ProgressTracker,
    ) -> Result<usize> {
        let mut converted = 0;

        for version in self.table.versions() {
            progress.set_message(&format!("Converting {}", version));

            let result = self
                .convert_one(version)
                .and_then(|output| sink.accept(version, output));

            if let Err(e) = result {
                warn!("Conversion of {} failed: {}", version, e);
                progress.finish_with_error(&format!("{} failed", version));
                return Err(Error::Batch {
                    version: version.to_string(),
                    converted,
                    source: Box::new(e),
                });
            }

            converted += 1;
            progress.increment(1);
        }

        progress.finish_with_message(&format!("Converted {} versions", converted));
        Ok(converted)
    }
}
