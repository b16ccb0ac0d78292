// src/commands.rs
//! Command handlers for the yarn-mappings CLI

use anyhow::Result;
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use yarn_mappings::progress::{CliProgress, LogProgress, ProgressTracker};
use yarn_mappings::{
    DirectorySink, DiscardSink, Error, MappingPipeline, OutputBuffer, OutputSink, PipelineConfig,
};

/// Convert one version and write its table
pub fn cmd_convert(config: &PipelineConfig, version: &str, output: Option<&Path>) -> Result<()> {
    let pipeline = MappingPipeline::from_config(config)?;

    let buffer = match pipeline.convert_one(version) {
        Ok(buffer) => buffer,
        Err(Error::UnknownVersion(_)) => {
            let known: Vec<&str> = pipeline.table().versions().collect();
            return Err(anyhow::anyhow!(
                "Unknown mapping version '{}'. Known versions: {}",
                version,
                known.join(", ")
            ));
        }
        Err(e) => return Err(e.into()),
    };

    match output {
        Some(path) if path == Path::new("-") => write_stdout(&buffer)?,
        Some(path) => write_file(&buffer, path)?,
        None => write_file(&buffer, &PathBuf::from(version))?,
    }

    eprintln!("Mappings processed successfully");
    Ok(())
}

/// Convert every known version
pub fn cmd_update(config: &PipelineConfig, output_dir: Option<&Path>) -> Result<()> {
    let pipeline = MappingPipeline::from_config(config)?;
    let progress = batch_progress(
        pipeline.table().len() as u64,
        std::io::stderr().is_terminal(),
    );

    let mut sink: Box<dyn OutputSink> = match output_dir {
        Some(dir) => Box::new(DirectorySink::new(dir)?),
        None => Box::new(DiscardSink),
    };

    let converted = pipeline.convert_all_with(sink.as_mut(), progress.as_ref())?;
    println!("Successfully updated {} mappings", converted);
    Ok(())
}

/// Progress bar on a terminal, log lines otherwise
fn batch_progress(length: u64, interactive: bool) -> Box<dyn ProgressTracker> {
    if interactive {
        Box::new(CliProgress::new("Updating mappings", length))
    } else {
        Box::new(LogProgress::new("Updating mappings", length))
    }
}

/// Print the version table
pub fn cmd_list(config: &PipelineConfig) -> Result<()> {
    let table = config.version_table()?;

    println!("Known versions ({}):", table.len());
    for entry in table.entries() {
        println!("  {}", entry);
    }
    Ok(())
}

/// Project a local Tiny v2 file
pub fn cmd_project(path: &Path, output: Option<&Path>) -> Result<()> {
    let bytes = std::fs::read(path)?;
    let document = yarn_mappings::tiny::parse_document(&bytes)?;
    let buffer = yarn_mappings::project(&document);

    match output {
        Some(out) => write_file(&buffer, out)?,
        None => write_stdout(&buffer)?,
    }
    Ok(())
}

fn write_file(buffer: &OutputBuffer, path: &Path) -> Result<()> {
    buffer.write_to(path)?;
    info!("Wrote {} lines to {}", buffer.line_count(), path.display());
    Ok(())
}

fn write_stdout(buffer: &OutputBuffer) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(buffer.as_bytes())?;
    if !buffer.is_empty() {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(())
}
