//! `versionsync <current> [next]`: bump the manifest version and its lock
//! entry, printing the version written.

use anyhow::Result;
use clap::Parser;
use relkit::commands;
use relkit::config::Config;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "versionsync")]
#[command(version, about = "Bump the manifest version and its lock file entry")]
struct Cli {
    /// Version currently declared in the manifest
    current: String,

    /// Version to bump to (default: next patch of current)
    next: Option<String>,

    /// Manifest path
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Lock file path
    #[arg(long)]
    lock: Option<PathBuf>,
}

fn main() -> ExitCode {
    commands::init_logging();
    commands::exit(run())
}

fn run() -> Result<u8> {
    let cli = Cli::parse();
    let mut config = Config::load()?.version;
    if let Some(manifest) = cli.manifest {
        config.manifest = manifest;
    }
    if let Some(lock) = cli.lock {
        config.lock = lock;
    }
    commands::bump(&config, &cli.current, cli.next.as_deref())
}
