//! Normalization of `cargo audit` reports into the dashboard's issue format.
//!
//! Each advisory becomes one [`CanonicalIssue`] attached to the lock file.
//! Malformed or missing input yields zero issues; only writing the output
//! can fail.
//!
//! # Example
//!
//! ```
//! use relkit::audit::{parse_or_empty, Normalizer};
//!
//! let report = parse_or_empty(r#"{"vulnerabilities": {"list": [
//!     {"advisory": {"id": "RUSTSEC-2024-0001", "title": "X", "url": "https://e"},
//!      "package": {"name": "foo", "version": "1.2.3"}}
//! ]}}"#)
//! .into_report();
//!
//! let issues = Normalizer::default().normalize(&report);
//! assert_eq!(
//!     issues.issues[0].primary_location.message,
//!     "RUSTSEC-2024-0001: X | package: foo 1.2.3 | see: https://e"
//! );
//! ```

mod report;
mod severity;

pub use report::{load_report, parse_or_empty, EmptyReason, LoadedReport};
pub use severity::SeverityTable;

use crate::config::AdvisoryConfig;
use crate::error::Result;
use crate::model::{
    Advisory, AdvisoryEntry, CanonicalIssue, IssueReport, PackageRef, PrimaryLocation, Severity,
    TextRange, VulnerabilityReport,
};
use crate::output::write_issues;
use std::path::Path;
use tracing::{debug, info};

/// Separator between the parts of an issue message.
const MESSAGE_SEPARATOR: &str = " | ";

pub struct Normalizer {
    config: AdvisoryConfig,
    severities: SeverityTable,
}

impl Normalizer {
    pub fn new(config: AdvisoryConfig) -> Self {
        let severities = SeverityTable::from_config(&config);
        Self { config, severities }
    }

    /// Uses `severities` instead of the table from `config`.
    pub fn with_severities(mut self, severities: SeverityTable) -> Self {
        self.severities = severities;
        self
    }

    pub fn map_severity(&self, raw: &str) -> Severity {
        self.severities.map(raw)
    }

    pub fn map_issue(&self, entry: &AdvisoryEntry) -> CanonicalIssue {
        let default_advisory = Advisory::default();
        let default_package = PackageRef::default();
        let advisory = entry.advisory.as_ref().unwrap_or(&default_advisory);
        let package = entry.package.as_ref().unwrap_or(&default_package);

        let rule_id = advisory
            .id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or(self.config.unknown_id.as_str());
        let title = advisory
            .title
            .as_deref()
            .unwrap_or(self.config.default_title.as_str());
        let name = package
            .name
            .as_deref()
            .unwrap_or(self.config.unknown_package.as_str());
        let version = package.version.as_deref().unwrap_or_default();

        let mut parts = vec![
            format!("{}: {}", rule_id, title),
            format!("package: {} {}", name, version),
        ];
        if let Some(url) = advisory.url.as_deref().filter(|u| !u.is_empty()) {
            parts.push(format!("see: {}", url));
        }

        let raw_severity = advisory.raw_severity();
        let severity = self.map_severity(&raw_severity);
        debug!(rule_id, raw_severity = raw_severity.as_str(), %severity, "mapped advisory");

        CanonicalIssue {
            engine_id: self.config.engine_id.clone(),
            rule_id: rule_id.to_string(),
            rule_repository: self.config.rule_repository.clone(),
            severity,
            issue_type: self.config.issue_type.clone(),
            primary_location: PrimaryLocation {
                message: parts.join(MESSAGE_SEPARATOR),
                file_path: self.config.file_path.clone(),
                text_range: TextRange::file_start(),
            },
        }
    }

    pub fn normalize(&self, report: &VulnerabilityReport) -> IssueReport {
        IssueReport::new(report.entries().iter().map(|e| self.map_issue(e)).collect())
    }

    /// Converts the report at `input` and writes the issues to `output`.
    ///
    /// Returns the number of issues written.
    pub fn convert(&self, input: &Path, output: &Path) -> Result<usize> {
        let report = load_report(input).into_report();
        let issues = self.normalize(&report);
        write_issues(output, &issues)?;
        info!(
            input = %input.display(),
            output = %output.display(),
            issues = issues.issues.len(),
            "converted audit report"
        );
        Ok(issues.issues.len())
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(AdvisoryConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::collections::BTreeMap;
    use std::fs;
    use tempfile::TempDir;

    fn entry(value: Value) -> AdvisoryEntry {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_message_with_url() {
        let issue = Normalizer::default().map_issue(&entry(json!({
            "advisory": {"id": "RUSTSEC-2024-0001", "title": "X", "url": "https://e"},
            "package": {"name": "foo", "version": "1.2.3"}
        })));

        assert_eq!(
            issue.primary_location.message,
            "RUSTSEC-2024-0001: X | package: foo 1.2.3 | see: https://e"
        );
        assert_eq!(issue.rule_id, "RUSTSEC-2024-0001");
        assert_eq!(issue.engine_id, "cargo-audit");
        assert_eq!(issue.rule_repository, "rustsec");
        assert_eq!(issue.issue_type, "VULNERABILITY");
        assert_eq!(issue.severity, Severity::Major);
        assert_eq!(issue.primary_location.file_path, "Cargo.lock");
        assert_eq!(issue.primary_location.text_range, TextRange::file_start());
    }

    #[test]
    fn test_message_without_url() {
        let issue = Normalizer::default().map_issue(&entry(json!({
            "advisory": {"id": "RUSTSEC-2023-0071", "title": "Marvin Attack", "url": ""},
            "package": {"name": "rsa", "version": "0.9.6"}
        })));

        assert_eq!(
            issue.primary_location.message,
            "RUSTSEC-2023-0071: Marvin Attack | package: rsa 0.9.6"
        );
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let issue = Normalizer::default().map_issue(&entry(json!({})));

        assert_eq!(issue.rule_id, "UNKNOWN");
        assert_eq!(
            issue.primary_location.message,
            "UNKNOWN: RustSec advisory | package: unknown "
        );
        assert_eq!(issue.severity, Severity::Major);
    }

    #[test]
    fn test_null_and_blank_id_become_unknown() {
        let normalizer = Normalizer::default();
        let null_id = normalizer.map_issue(&entry(json!({"advisory": {"id": null}})));
        let blank_id = normalizer.map_issue(&entry(json!({"advisory": {"id": "  "}})));

        assert_eq!(null_id.rule_id, "UNKNOWN");
        assert_eq!(blank_id.rule_id, "UNKNOWN");
    }

    #[test]
    fn test_severity_from_label_and_cvss() {
        let normalizer = Normalizer::default();
        let labelled = normalizer.map_issue(&entry(json!({"advisory": {"severity": "LOW"}})));
        let informational =
            normalizer.map_issue(&entry(json!({"advisory": {"severity": "informational"}})));
        let scored = normalizer.map_issue(&entry(json!({
            "advisory": {"cvss": "CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H", "severity": "low"}
        })));
        let numeric = normalizer.map_issue(&entry(json!({"advisory": {"cvss": 9.8}})));

        assert_eq!(labelled.severity, Severity::Minor);
        assert_eq!(informational.severity, Severity::Info);
        assert_eq!(scored.severity, Severity::Major);
        assert_eq!(numeric.severity, Severity::Major);
    }

    #[test]
    fn test_substituted_taxonomy() {
        let labels: BTreeMap<String, Severity> =
            [("low".to_string(), Severity::Critical)].into_iter().collect();
        let normalizer = Normalizer::default()
            .with_severities(SeverityTable::new(labels, Severity::Info));

        assert_eq!(normalizer.map_severity("low"), Severity::Critical);
        assert_eq!(normalizer.map_severity("high"), Severity::Info);
    }

    #[test]
    fn test_custom_constants() {
        let config = AdvisoryConfig {
            engine_id: "osv-scanner".to_string(),
            file_path: "deps/Cargo.lock".to_string(),
            ..AdvisoryConfig::default()
        };
        let issue = Normalizer::new(config).map_issue(&entry(json!({})));

        assert_eq!(issue.engine_id, "osv-scanner");
        assert_eq!(issue.primary_location.file_path, "deps/Cargo.lock");
    }

    #[test]
    fn test_convert_empty_report() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("missing.json");
        let output = dir.path().join("out/sonar.json");

        let count = Normalizer::default().convert(&input, &output).unwrap();

        assert_eq!(count, 0);
        let written: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written, json!({"issues": []}));
    }

    #[test]
    fn test_convert_single_advisory() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("audit.json");
        let output = dir.path().join("sonar.json");
        fs::write(
            &input,
            json!({
                "vulnerabilities": {
                    "found": true,
                    "count": 1,
                    "list": [{
                        "advisory": {
                            "id": "RUSTSEC-2024-0001",
                            "title": "X",
                            "url": "https://e",
                            "cvss": null
                        },
                        "package": {"name": "foo", "version": "1.2.3"}
                    }]
                }
            })
            .to_string(),
        )
        .unwrap();

        let count = Normalizer::default().convert(&input, &output).unwrap();

        assert_eq!(count, 1);
        let written: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(
            written,
            json!({
                "issues": [{
                    "engineId": "cargo-audit",
                    "ruleId": "RUSTSEC-2024-0001",
                    "ruleRepository": "rustsec",
                    "severity": "MAJOR",
                    "type": "VULNERABILITY",
                    "primaryLocation": {
                        "message": "RUSTSEC-2024-0001: X | package: foo 1.2.3 | see: https://e",
                        "filePath": "Cargo.lock",
                        "textRange": {
                            "startLine": 1,
                            "startColumn": 0,
                            "endLine": 1,
                            "endColumn": 1
                        }
                    }
                }]
            })
        );
    }

    #[test]
    fn test_convert_keeps_entries_beside_mistyped_one() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("audit.json");
        let output = dir.path().join("sonar.json");
        fs::write(
            &input,
            json!({
                "vulnerabilities": {
                    "list": [
                        {"advisory": {"id": "RUSTSEC-2024-0001", "title": "X"},
                         "package": {"name": "foo", "version": "1.2.3"}},
                        {"advisory": {"id": "RUSTSEC-2024-0002", "title": 42},
                         "package": {"name": "bar", "version": 1}}
                    ]
                }
            })
            .to_string(),
        )
        .unwrap();

        let count = Normalizer::default().convert(&input, &output).unwrap();

        assert_eq!(count, 2);
        let written: IssueReport =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(
            written.issues[1].primary_location.message,
            "RUSTSEC-2024-0002: 42 | package: bar 1"
        );
    }

    #[test]
    fn test_convert_malformed_input_still_writes() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("audit.json");
        let output = dir.path().join("sonar.json");
        fs::write(&input, "cargo-audit: error: couldn't fetch advisory database").unwrap();

        let count = Normalizer::default().convert(&input, &output).unwrap();

        assert_eq!(count, 0);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "{\n  \"issues\": []\n}\n"
        );
    }
}
