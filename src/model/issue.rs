use serde::{Deserialize, Serialize};
use std::fmt;

/// The dashboard's four-level severity scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Critical,
    Major,
    Minor,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::Major => "MAJOR",
            Severity::Minor => "MINOR",
            Severity::Info => "INFO",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A line/column span inside the issue's file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRange {
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

impl TextRange {
    /// The first character cell of the file.
    ///
    /// Advisories concern the whole lock file rather than a line in it; the
    /// dashboard rejects zero-width ranges, so this is the narrowest range it
    /// will accept.
    pub const fn file_start() -> Self {
        Self {
            start_line: 1,
            start_column: 0,
            end_line: 1,
            end_column: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryLocation {
    pub message: String,
    pub file_path: String,
    pub text_range: TextRange,
}

/// One normalized finding in the generic issue import format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalIssue {
    pub engine_id: String,
    pub rule_id: String,
    pub rule_repository: String,
    pub severity: Severity,
    #[serde(rename = "type")]
    pub issue_type: String,
    pub primary_location: PrimaryLocation,
}

/// The `{"issues": [...]}` envelope written by the normalizer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueReport {
    pub issues: Vec<CanonicalIssue>,
}

impl IssueReport {
    pub fn new(issues: Vec<CanonicalIssue>) -> Self {
        Self { issues }
    }
}
