//! Generic issue import output for the static-analysis dashboard.
//!
//! The written file is the `{"issues": [...]}` document the dashboard's
//! external issue importer reads.

use crate::error::{Error, Result};
use crate::model::IssueReport;
use std::fs;
use std::path::Path;
use tracing::info;

/// Pretty-prints the report with a trailing newline.
pub fn generate_issues_string(report: &IssueReport) -> serde_json::Result<String> {
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    Ok(json)
}

/// Writes the report to `path`, creating missing parent directories.
pub fn write_issues(path: &Path, report: &IssueReport) -> Result<()> {
    let output_err = |source: std::io::Error| Error::OutputIo {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(output_err)?;
        }
    }

    let json = generate_issues_string(report).map_err(|e| output_err(e.into()))?;
    fs::write(path, json).map_err(output_err)?;
    info!(path = %path.display(), issues = report.issues.len(), "wrote issue report");
    Ok(())
}
