//! The `version = "..."` declaration in the package manifest.

use super::substitute::replace_exactly_once;
use crate::error::{Error, Result};
use regex::{Captures, Regex};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Matches a line-anchored `version = "<value>"` declaration.
///
/// Only horizontal whitespace is allowed around `=`, and a trailing comment
/// or CR stays in `tail` so it survives the rewrite.
fn declaration_pattern(value: &str) -> Result<Regex> {
    Ok(Regex::new(&format!(
        r#"(?m)^(?P<head>version[ \t]*=[ \t]*"){}(?P<tail>"[ \t]*(?:#[^\r\n]*)?\r?)$"#,
        regex::escape(value)
    ))?)
}

/// Rewrites the manifest text in memory, requiring exactly one declaration
/// of `current`.
pub fn substitute_declaration(
    text: &str,
    path: &Path,
    current: &str,
    next: &str,
) -> Result<String> {
    let pattern = declaration_pattern(current)?;
    replace_exactly_once(text, &pattern, |caps: &Captures| {
        format!("{}{}{}", &caps["head"], next, &caps["tail"])
    })
    .map_err(|count| {
        debug!(path = %path.display(), %count, "manifest declaration lookup failed");
        if count.is_missing() {
            Error::DeclarationNotFound {
                path: path.to_path_buf(),
                value: current.to_string(),
            }
        } else {
            Error::AmbiguousDeclaration {
                path: path.to_path_buf(),
                value: current.to_string(),
                count: count.0,
            }
        }
    })
}

/// Replaces the manifest's `current` version declaration with `next`.
///
/// Everything outside the quoted value is written back byte for byte.
pub fn rewrite_manifest(path: &Path, current: &str, next: &str) -> Result<()> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let updated = substitute_declaration(&text, path, current, next)?;
    fs::write(path, updated).map_err(|e| Error::io(path, e))?;
    info!(path = %path.display(), from = current, to = next, "updated manifest version");
    Ok(())
}

/// Reads `[package].name` from manifest text, if it has one.
pub fn package_name(text: &str) -> Option<String> {
    let table: toml::Table = text.parse().ok()?;
    table
        .get("package")?
        .get("name")?
        .as_str()
        .map(str::to_string)
}
