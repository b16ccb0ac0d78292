// src/lib.rs

//! Yarn mapping converter
//!
//! Downloads Yarn `mergedv2` jars, reads the Tiny v2 mapping file inside
//! and projects it into a two-column `<intermediary> <named>` table.
//!
//! # Architecture
//!
//! - `fetch`: single-shot HTTP download of a release archive
//! - `archive`: extraction of `mappings/mappings.tiny` from the jar
//! - `tiny`: Tiny v2 parser producing a document plus line diagnostics
//! - `projection`: document to two-column output
//! - `pipeline`: per-version orchestration and sequential batch runs

pub mod archive;
pub mod config;
mod error;
pub mod fetch;
pub mod pipeline;
pub mod progress;
pub mod projection;
pub mod tiny;
pub mod version;

pub use config::PipelineConfig;
pub use error::{Error, Result};
pub use fetch::{ArchiveFetcher, HttpFetcher};
pub use pipeline::{DirectorySink, DiscardSink, MappingPipeline, OutputSink};
pub use projection::{OutputBuffer, project};
pub use tiny::{ClassRecord, Diagnostic, MappingDocument, MemberRecord};
pub use version::{VersionEntry, VersionTable};
