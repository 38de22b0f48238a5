//! The package's own entry in the lock file.

use super::substitute::{replace_exactly_once, MatchCount};
use crate::error::{Error, Result};
use regex::{Captures, Regex};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Outcome of syncing the lock file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockSync {
    /// No lock file on disk; nothing to do.
    Absent,
    Rewritten,
    /// The lock file exists but the `name`/`version` pair did not match
    /// exactly once. The file is left untouched.
    Mismatch(MatchCount),
}

impl LockSync {
    pub fn is_ok(&self) -> bool {
        !matches!(self, LockSync::Mismatch(_))
    }
}

/// A computed but not yet written lock update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockPlan {
    Absent,
    Rewrite(String),
    Mismatch(MatchCount),
}

fn entry_pattern(package: &str, value: &str) -> Result<Regex> {
    Ok(Regex::new(&format!(
        r#"(?m)^(?P<head>name = "{}"\r?\nversion = "){}(?P<tail>"\r?)$"#,
        regex::escape(package),
        regex::escape(value)
    ))?)
}

pub fn substitute_entry(
    text: &str,
    package: &str,
    current: &str,
    next: &str,
) -> Result<std::result::Result<String, MatchCount>> {
    let pattern = entry_pattern(package, current)?;
    Ok(replace_exactly_once(text, &pattern, |caps: &Captures| {
        format!("{}{}{}", &caps["head"], next, &caps["tail"])
    }))
}

/// Works out the lock rewrite without touching the file.
pub fn plan(path: &Path, package: &str, current: &str, next: &str) -> Result<LockPlan> {
    if !path.exists() {
        debug!(path = %path.display(), "no lock file, skipping");
        return Ok(LockPlan::Absent);
    }

    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    Ok(match substitute_entry(&text, package, current, next)? {
        Ok(updated) => LockPlan::Rewrite(updated),
        Err(count) => LockPlan::Mismatch(count),
    })
}

/// Points the lock entry for `package` at `next`.
///
/// A missing lock file is fine (local checkouts often lack one), but an
/// existing file without exactly one `name`/`version` pair for `current`
/// is reported as [`LockSync::Mismatch`].
pub fn rewrite_lock_entry(
    path: &Path,
    package: &str,
    current: &str,
    next: &str,
) -> Result<LockSync> {
    match plan(path, package, current, next)? {
        LockPlan::Absent => Ok(LockSync::Absent),
        LockPlan::Rewrite(updated) => {
            fs::write(path, updated).map_err(|e| Error::io(path, e))?;
            info!(path = %path.display(), package, from = current, to = next, "updated lock entry");
            Ok(LockSync::Rewritten)
        }
        LockPlan::Mismatch(count) => {
            warn!(path = %path.display(), package, version = current, %count, "lock entry not found");
            Ok(LockSync::Mismatch(count))
        }
    }
}
