use serde::Deserialize;
use serde_json::Value;

/// Top level of a `cargo audit --json` report.
///
/// Only the fields the normalizer reads are modelled; everything else in the
/// report (warnings, lockfile stats, database metadata) is ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VulnerabilityReport {
    #[serde(default)]
    pub vulnerabilities: Option<VulnerabilityList>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VulnerabilityList {
    #[serde(default)]
    pub list: Option<Vec<AdvisoryEntry>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AdvisoryEntry {
    #[serde(default)]
    pub advisory: Option<Advisory>,
    #[serde(default)]
    pub package: Option<PackageRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Advisory {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// CVSS vector or numeric score.
    #[serde(default)]
    pub cvss: Option<Value>,
    /// Categorical label such as `"high"`.
    #[serde(default)]
    pub severity: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PackageRef {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl VulnerabilityReport {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<AdvisoryEntry>) -> Self {
        Self {
            vulnerabilities: Some(VulnerabilityList {
                list: Some(entries),
            }),
        }
    }

    pub fn entries(&self) -> &[AdvisoryEntry] {
        self.vulnerabilities
            .as_ref()
            .and_then(|v| v.list.as_deref())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

impl AdvisoryEntry {
    /// Builds an entry field by field, dropping values of the wrong type
    /// instead of rejecting the entry.
    ///
    /// Returns `None` when `value` is not an object at all.
    pub fn repair(value: &Value) -> Option<Self> {
        let entry = value.as_object()?;
        Some(Self {
            advisory: entry.get("advisory").and_then(Advisory::repair),
            package: entry.get("package").and_then(PackageRef::repair),
        })
    }
}

impl Advisory {
    pub fn repair(value: &Value) -> Option<Self> {
        let advisory = value.as_object()?;
        let field = |key: &str| advisory.get(key).filter(|v| !v.is_null()).cloned();
        Some(Self {
            id: advisory.get("id").and_then(lenient_text),
            title: advisory.get("title").and_then(lenient_text),
            url: advisory.get("url").and_then(lenient_text),
            cvss: field("cvss"),
            severity: field("severity"),
        })
    }

    /// The raw severity indicator: the CVSS field when it carries a value,
    /// otherwise the categorical label, otherwise empty.
    pub fn raw_severity(&self) -> String {
        [self.cvss.as_ref(), self.severity.as_ref()]
            .into_iter()
            .flatten()
            .find(|value| is_truthy(value))
            .map(render_indicator)
            .unwrap_or_default()
    }
}

impl PackageRef {
    pub fn repair(value: &Value) -> Option<Self> {
        let package = value.as_object()?;
        Some(Self {
            name: package.get("name").and_then(lenient_text),
            version: package.get("version").and_then(lenient_text),
        })
    }
}

/// Strings as-is, numbers and booleans as their text; anything else is
/// treated as absent.
fn lenient_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn render_indicator(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
