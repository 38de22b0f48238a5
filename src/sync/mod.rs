//! Keeping the manifest version and its lock entry in step.
//!
//! A bump rewrites exactly one `version = "..."` line in the manifest and,
//! when a lock file exists, the `name`/`version` pair for the package in
//! it. Both edits are worked out in memory first; nothing is written unless
//! both succeed.
//!
//! # Example
//!
//! ```no_run
//! use relkit::sync::VersionSync;
//!
//! let next = VersionSync::new("Cargo.toml", "Cargo.lock").run("1.4.2", None)?;
//! assert_eq!(next, "1.4.3");
//! # Ok::<(), relkit::Error>(())
//! ```

mod lock;
mod manifest;
mod substitute;

pub use lock::{rewrite_lock_entry, LockPlan, LockSync};
pub use manifest::{package_name, rewrite_manifest};
pub use substitute::{replace_exactly_once, MatchCount};

use crate::config::VersionConfig;
use crate::error::{Error, Result};
use crate::model::{is_newer, next_patch};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

pub struct VersionSync {
    manifest: PathBuf,
    lock: PathBuf,
    package: Option<String>,
}

impl VersionSync {
    pub fn new(manifest: impl Into<PathBuf>, lock: impl Into<PathBuf>) -> Self {
        Self {
            manifest: manifest.into(),
            lock: lock.into(),
            package: None,
        }
    }

    pub fn from_config(config: &VersionConfig) -> Self {
        Self {
            manifest: config.manifest.clone(),
            lock: config.lock.clone(),
            package: config.package.clone(),
        }
    }

    /// Names the lock entry to bump instead of reading it from the manifest.
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    /// The explicit target if given, otherwise the next patch of `current`.
    ///
    /// An explicit target need not be strict semver, but it is spliced into a
    /// quoted TOML string, so quotes and line breaks are refused.
    pub fn resolve_next(current: &str, next: Option<&str>) -> Result<String> {
        match next {
            Some(next) => {
                if next.contains(['"', '\r', '\n']) {
                    return Err(Error::InvalidVersion {
                        value: next.to_string(),
                    });
                }
                if is_newer(next, current) == Some(false) {
                    warn!(current, next, "target version is not newer than the current one");
                }
                Ok(next.to_string())
            }
            None => Ok(next_patch(current)?.to_string()),
        }
    }

    /// Bumps `current` to `next` (or its next patch) and returns the version
    /// written.
    pub fn run(&self, current: &str, next: Option<&str>) -> Result<String> {
        let next = Self::resolve_next(current, next)?;

        let manifest_text =
            fs::read_to_string(&self.manifest).map_err(|e| Error::io(&self.manifest, e))?;
        let manifest_update =
            manifest::substitute_declaration(&manifest_text, &self.manifest, current, &next)?;

        let lock_update = if self.lock.exists() {
            let package = self.package_name(&manifest_text)?;
            match lock::plan(&self.lock, &package, current, &next)? {
                LockPlan::Absent => None,
                LockPlan::Rewrite(text) => Some(text),
                LockPlan::Mismatch(count) => {
                    return Err(Error::LockMismatch {
                        path: self.lock.clone(),
                        package,
                        value: current.to_string(),
                        count: count.0,
                    })
                }
            }
        } else {
            None
        };

        fs::write(&self.manifest, manifest_update).map_err(|e| Error::io(&self.manifest, e))?;
        if let Some(text) = lock_update {
            fs::write(&self.lock, text).map_err(|e| Error::io(&self.lock, e))?;
        }

        info!(
            manifest = %self.manifest.display(),
            lock = %self.lock.display(),
            from = current,
            to = next.as_str(),
            "bumped version"
        );
        Ok(next)
    }

    fn package_name(&self, manifest_text: &str) -> Result<String> {
        self.package
            .clone()
            .or_else(|| package_name(manifest_text))
            .ok_or_else(|| Error::PackageNameUnknown {
                path: self.manifest.clone(),
            })
    }
}
