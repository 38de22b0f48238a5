use crate::config::AdvisoryConfig;
use crate::model::Severity;
use std::collections::BTreeMap;

/// Maps scanner severity labels onto the dashboard's scale.
///
/// Lookup is by lower-cased label only. Anything not in the table, numeric
/// CVSS scores and vectors included, gets the fallback so an unrecognised
/// finding still draws attention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeverityTable {
    labels: BTreeMap<String, Severity>,
    fallback: Severity,
}

impl SeverityTable {
    pub fn new(labels: BTreeMap<String, Severity>, fallback: Severity) -> Self {
        let labels = labels
            .into_iter()
            .map(|(label, severity)| (label.to_lowercase(), severity))
            .collect();
        Self { labels, fallback }
    }

    pub fn from_config(config: &AdvisoryConfig) -> Self {
        Self::new(config.severities.clone(), config.fallback_severity)
    }

    pub fn map(&self, raw: &str) -> Severity {
        self.labels
            .get(&raw.to_lowercase())
            .copied()
            .unwrap_or(self.fallback)
    }

    pub fn fallback(&self) -> Severity {
        self.fallback
    }
}

impl Default for SeverityTable {
    fn default() -> Self {
        Self::from_config(&AdvisoryConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels() {
        let table = SeverityTable::default();
        assert_eq!(table.map("critical"), Severity::Critical);
        assert_eq!(table.map("high"), Severity::Major);
        assert_eq!(table.map("medium"), Severity::Major);
        assert_eq!(table.map("low"), Severity::Minor);
        assert_eq!(table.map("informational"), Severity::Info);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let table = SeverityTable::default();
        assert_eq!(table.map("HIGH"), Severity::Major);
        assert_eq!(table.map("Critical"), Severity::Critical);
        assert_eq!(table.map("LOW"), Severity::Minor);
    }

    #[test]
    fn test_unknown_values_fall_back_to_major() {
        let table = SeverityTable::default();
        assert_eq!(table.map(""), Severity::Major);
        assert_eq!(table.map("9.8"), Severity::Major);
        assert_eq!(table.map("unknown-label"), Severity::Major);
        assert_eq!(
            table.map("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H"),
            Severity::Major
        );
    }

    #[test]
    fn test_substitute_taxonomy() {
        let labels = [("Severe".to_string(), Severity::Critical)].into_iter().collect();
        let table = SeverityTable::new(labels, Severity::Info);

        assert_eq!(table.map("severe"), Severity::Critical);
        assert_eq!(table.map("high"), Severity::Info);
        assert_eq!(table.fallback(), Severity::Info);
    }
}
