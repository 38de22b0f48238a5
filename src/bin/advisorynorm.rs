//! `advisorynorm <input.json> <output.json>`: convert a cargo-audit report
//! into generic issue JSON. A missing or malformed report yields no issues.

use anyhow::Result;
use clap::Parser;
use relkit::commands;
use relkit::config::Config;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "advisorynorm")]
#[command(version, about = "Convert cargo-audit JSON into generic issue JSON")]
struct Cli {
    /// cargo-audit JSON report
    input: PathBuf,

    /// Generic issue JSON to write
    output: PathBuf,
}

fn main() -> ExitCode {
    commands::init_logging();
    commands::exit(run())
}

fn run() -> Result<u8> {
    let cli = Cli::parse();
    let config = Config::load()?;
    commands::convert(&config.advisory, &cli.input, &cli.output)
}
