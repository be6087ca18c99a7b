mod env_file;
mod flags;
mod metadata;
mod utils;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::{debug, error, info};
use std::path::{Path, PathBuf};
use std::process;

/// Generate the BYOH agent flags environment file from provisioned host metadata
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Set logging level
    #[arg(long, value_enum, default_value_t = LogLevel::Error)]
    log_level: LogLevel,

    /// Host metadata written by the provisioning process
    #[arg(long, value_name = "PATH", default_value = metadata::DEFAULT_METADATA_PATH)]
    metadata_file: PathBuf,

    /// Environment file to publish the agent flags to
    #[arg(long, value_name = "PATH", default_value = env_file::DEFAULT_FLAGS_FILE_PATH)]
    output_file: PathBuf,

    /// Use this host name instead of the one reported by the OS
    #[arg(long, value_name = "NAME")]
    hostname: Option<String>,

    /// Print the generated assignment to stdout instead of writing the file
    #[arg(long)]
    dry_run: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn generate(metadata_file: &Path, hostname: Option<String>) -> Result<String> {
    // Load host metadata
    let metadata = metadata::load(metadata_file)?;

    // Prefer an explicit host name over the OS one
    let hostname = match hostname {
        Some(name) => name,
        None => utils::local_hostname()?,
    };
    info!("Host name: {}", hostname);

    let flags = flags::build(&metadata, &hostname)?;
    Ok(env_file::render(&flags))
}

fn main() {
    let cli = Cli::parse();

    // Initialize logger
    env_logger::Builder::new()
        .filter_level(cli.log_level.to_filter())
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    debug!("CLI arguments: {:#?}", cli);

    // Build the assignment line
    let contents = match generate(&cli.metadata_file, cli.hostname.clone()) {
        Ok(contents) => contents,
        Err(err) => {
            error!("Failed to generate agent flags: {:#}", err);
            process::exit(1);
        }
    };

    // Print only, leave the published file alone
    if cli.dry_run {
        println!("{}", contents);
        return;
    }

    // Publish the flags file
    if let Err(err) = env_file::write_atomic(&cli.output_file, &contents) {
        error!("Failed to write agent flags: {:#}", err);
        process::exit(1);
    }
}
