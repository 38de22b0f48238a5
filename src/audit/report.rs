//! Soft-fail loading of audit reports.
//!
//! A scanner that finds nothing may write nothing at all, so a missing,
//! blank, or unreadable report means "no findings" rather than an error.

use crate::model::{AdvisoryEntry, VulnerabilityReport};
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Why a report was treated as having no findings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyReason {
    Missing,
    Blank,
    Malformed(String),
}

impl fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyReason::Missing => write!(f, "report not found"),
            EmptyReason::Blank => write!(f, "report is empty"),
            EmptyReason::Malformed(err) => write!(f, "report is malformed: {}", err),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadedReport {
    Findings(VulnerabilityReport),
    Empty(EmptyReason),
}

impl LoadedReport {
    pub fn into_report(self) -> VulnerabilityReport {
        match self {
            LoadedReport::Findings(report) => report,
            LoadedReport::Empty(_) => VulnerabilityReport::empty(),
        }
    }

    pub fn empty_reason(&self) -> Option<&EmptyReason> {
        match self {
            LoadedReport::Findings(_) => None,
            LoadedReport::Empty(reason) => Some(reason),
        }
    }
}

/// Parses report text, degrading to [`LoadedReport::Empty`] instead of
/// failing.
pub fn parse_or_empty(text: &str) -> LoadedReport {
    if text.trim().is_empty() {
        return LoadedReport::Empty(EmptyReason::Blank);
    }

    let value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(err) => return LoadedReport::Empty(EmptyReason::Malformed(err.to_string())),
    };

    if !value.is_object() {
        return LoadedReport::Empty(EmptyReason::Malformed(
            "expected a JSON object at the top level".to_string(),
        ));
    }

    LoadedReport::Findings(repair_report(&value))
}

/// Builds a report entry by entry so one mistyped field cannot hide the
/// other advisories. Entries that are not objects are skipped.
fn repair_report(value: &Value) -> VulnerabilityReport {
    let list = match value.get("vulnerabilities").and_then(|v| v.get("list")) {
        None | Some(Value::Null) => return VulnerabilityReport::empty(),
        Some(Value::Array(list)) => list,
        Some(other) => {
            warn!(found = %other, "vulnerability list is not an array; ignoring it");
            return VulnerabilityReport::empty();
        }
    };

    let entries = list
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| {
            let entry = AdvisoryEntry::repair(raw);
            if entry.is_none() {
                warn!(index, found = %raw, "skipping advisory entry that is not an object");
            }
            entry
        })
        .collect();

    VulnerabilityReport::from_entries(entries)
}

/// Reads and parses the report at `path`; never fails.
pub fn load_report(path: &Path) -> LoadedReport {
    let loaded = match fs::read_to_string(path) {
        Ok(text) => parse_or_empty(&text),
        Err(err) => {
            debug!(path = %path.display(), error = %err, "cannot read report");
            LoadedReport::Empty(EmptyReason::Missing)
        }
    };

    match &loaded {
        LoadedReport::Findings(report) => {
            debug!(path = %path.display(), advisories = report.len(), "loaded report");
        }
        LoadedReport::Empty(reason) => {
            warn!(path = %path.display(), %reason, "treating report as having no findings");
        }
    }

    loaded
}
