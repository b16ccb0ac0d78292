// src/main.rs

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use yarn_mappings::config::{PipelineConfig, load_config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber for logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => PipelineConfig::default(),
    };

    match cli.command {
        Some(Commands::Convert { version, output }) => {
            commands::cmd_convert(&config, &version, output.as_deref())
        }
        Some(Commands::Update { output_dir }) => {
            commands::cmd_update(&config, output_dir.as_deref())
        }
        Some(Commands::List) => commands::cmd_list(&config),
        Some(Commands::Project { path, output }) => {
            commands::cmd_project(&path, output.as_deref())
        }
        None => {
            println!("yarn-mappings v{}", env!("CARGO_PKG_VERSION"));
            println!("Run 'yarn-mappings --help' for usage information");
            Ok(())
        }
    }
}
