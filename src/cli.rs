// src/cli.rs
//! CLI definitions for yarn-mappings
//!
//! This module contains all command-line interface definitions using clap.
//! The actual command implementations are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "yarn-mappings")]
#[command(version)]
#[command(about = "Convert Yarn Tiny v2 mappings into two-column rename tables", long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert the mappings of a single version
    Convert {
        /// Mapping version (see `list`)
        version: String,

        /// Output file; `-` writes to stdout (default: ./<version>)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert every known version in order, stopping at the first failure
    Update {
        /// Directory receiving one file per version
        #[arg(short = 'd', long)]
        output_dir: Option<PathBuf>,
    },

    /// List known versions
    List,

    /// Project a local Tiny v2 file without downloading anything
    Project {
        /// Path to the .tiny file
        path: PathBuf,

        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
