//! Command runners shared by the `relkit`, `versionsync` and `advisorynorm`
//! binaries.
//!
//! Each runner prints its result to stdout and returns the process exit
//! code; diagnostics go to stderr through `tracing` and [`exit`].

use crate::audit::Normalizer;
use crate::config::{AdvisoryConfig, DigestConfig, VersionConfig};
use crate::digest::{lock_hash, CiOutput};
use crate::model::next_patch;
use crate::sync::VersionSync;
use anyhow::Result;
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Exit codes for CI integration
pub mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const ERROR: u8 = 1;
}

/// Environment variable holding the log filter, e.g. `RELKIT_LOG=debug`.
pub const LOG_ENV: &str = "RELKIT_LOG";

/// Sends logs to stderr so stdout only carries command output.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Turns a runner's result into the process exit code, reporting errors once.
pub fn exit(result: Result<u8>) -> ExitCode {
    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_codes::ERROR)
        }
    }
}

pub fn bump(config: &VersionConfig, current: &str, next: Option<&str>) -> Result<u8> {
    let next = VersionSync::from_config(config).run(current, next)?;
    println!("{}", next);
    Ok(exit_codes::SUCCESS)
}

pub fn print_next_patch(current: &str) -> Result<u8> {
    println!("{}", next_patch(current)?);
    Ok(exit_codes::SUCCESS)
}

pub fn convert(config: &AdvisoryConfig, input: &Path, output: &Path) -> Result<u8> {
    Normalizer::new(config.clone()).convert(input, output)?;
    Ok(exit_codes::SUCCESS)
}

/// Prints `hash=<hex>` for the lock file and publishes it to the CI sink.
pub fn publish_lock_hash(config: &DigestConfig, path: &Path) -> Result<u8> {
    let hash = lock_hash(path)?;

    if let Some(sink) = CiOutput::from_env(&config.output_env) {
        sink.write("hash", &hash)?;
    }

    println!("hash={}", hash);
    Ok(exit_codes::SUCCESS)
}
