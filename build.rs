// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common argument: configuration file
fn config_arg() -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .value_name("PATH")
        .global(true)
        .help("Path to a TOML configuration file")
}

/// Common argument: debug logging
fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::SetTrue)
        .global(true)
        .help("Enable debug logging")
}

fn build_cli() -> Command {
    Command::new("yarn-mappings")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Yarn Tiny v2 mappings into two-column rename tables")
        .subcommand_required(false)
        .arg(config_arg())
        .arg(verbose_arg())
        .subcommand(
            Command::new("convert")
                .about("Convert the mappings of a single version")
                .arg(Arg::new("version").required(true).help("Mapping version"))
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("PATH")
                        .help("Output file; - writes to stdout"),
                ),
        )
        .subcommand(
            Command::new("update")
                .about("Convert every known version in order, stopping at the first failure")
                .arg(
                    Arg::new("output_dir")
                        .short('d')
                        .long("output-dir")
                        .value_name("DIR")
                        .help("Directory receiving one file per version"),
                ),
        )
        .subcommand(Command::new("list").about("List known versions"))
        .subcommand(
            Command::new("project")
                .about("Project a local Tiny v2 file without downloading anything")
                .arg(Arg::new("path").required(true).help("Path to the .tiny file"))
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("PATH")
                        .help("Output file; stdout when omitted"),
                ),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = match env::var("OUT_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=OUT_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = out_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("yarn-mappings.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
