//! Lock file fingerprinting and the CI `key=value` output channel.
//!
//! CI runners expose a file path in an environment variable (`GITHUB_OUTPUT`
//! on GitHub Actions); appending `key=value` lines to it publishes step
//! outputs. Outside CI the variable is unset and the sink is simply absent.

use crate::error::{Error, Result};
use sha2::{Digest, Sha256};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Hex-encoded SHA-256 of the lock file's bytes.
pub fn lock_hash(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(Error::LockfileNotFound {
            path: path.to_path_buf(),
        });
    }

    let data = fs::read(path).map_err(|e| Error::io(path, e))?;
    let mut hasher = Sha256::new();
    hasher.update(&data);
    Ok(hex::encode(hasher.finalize()))
}

/// Append-only `key=value` sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CiOutput {
    path: PathBuf,
}

impl CiOutput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The sink named by environment variable `var`, if it is set and
    /// non-empty.
    pub fn from_env(var: &str) -> Option<Self> {
        let value = std::env::var_os(var)?;
        if value.is_empty() {
            return None;
        }
        Some(Self::new(value))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, key: &str, value: &str) -> Result<()> {
        let ci_err = |source: std::io::Error| Error::CiOutput {
            path: self.path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(ci_err)?;
        writeln!(file, "{}={}", key, value).map_err(ci_err)?;
        debug!(path = %self.path.display(), key, "wrote CI output");
        Ok(())
    }
}
