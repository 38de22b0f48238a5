//! Configuration file handling.
//!
//! This module provides loading and saving of relkit configuration from a
//! TOML file.
//!
//! # Configuration Location
//!
//! A `--config <path>` argument overrides the lookup. Otherwise the first of
//! these that exists is used:
//! - `./relkit.toml` in the working directory
//! - Linux: `~/.config/relkit/config.toml`
//! - macOS: `~/Library/Application Support/relkit/config.toml`
//! - Windows: `%APPDATA%\relkit\config.toml`
//!
//! # Example Configuration
//!
//! ```toml
//! [version]
//! manifest = "Cargo.toml"
//! lock = "Cargo.lock"
//! package = "fixdecoder"
//!
//! [advisory]
//! engine_id = "cargo-audit"
//! fallback_severity = "MAJOR"
//!
//! [advisory.severities]
//! critical = "CRITICAL"
//! high = "MAJOR"
//!
//! [digest]
//! output_env = "GITHUB_OUTPUT"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::Severity;

/// File name looked up in the working directory before the user config.
pub const LOCAL_CONFIG_FILE: &str = "relkit.toml";

/// Application configuration.
///
/// Every section is optional in the file; missing keys take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub version: VersionConfig,
    pub advisory: AdvisoryConfig,
    pub digest: DigestConfig,
}

/// Where the version lives and which lock entry follows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionConfig {
    /// Default: `Cargo.toml`
    pub manifest: PathBuf,

    /// Default: `Cargo.lock`
    pub lock: PathBuf,

    /// Package whose lock entry is bumped.
    ///
    /// Default: the manifest's `[package].name`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
}

impl Default for VersionConfig {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from("Cargo.toml"),
            lock: PathBuf::from("Cargo.lock"),
            package: None,
        }
    }
}

/// Constants stamped on every normalized issue, and the severity taxonomy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisoryConfig {
    pub engine_id: String,
    pub rule_repository: String,
    pub issue_type: String,

    /// File every issue is attached to.
    pub file_path: String,

    pub unknown_id: String,
    pub default_title: String,
    pub unknown_package: String,

    /// Severity for indicators missing from `severities`.
    pub fallback_severity: Severity,

    /// Lower-case scanner label to dashboard severity.
    pub severities: BTreeMap<String, Severity>,
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            engine_id: "cargo-audit".to_string(),
            rule_repository: "rustsec".to_string(),
            issue_type: "VULNERABILITY".to_string(),
            file_path: "Cargo.lock".to_string(),
            unknown_id: "UNKNOWN".to_string(),
            default_title: "RustSec advisory".to_string(),
            unknown_package: "unknown".to_string(),
            fallback_severity: Severity::Major,
            severities: default_severities(),
        }
    }
}

fn default_severities() -> BTreeMap<String, Severity> {
    [
        ("critical", Severity::Critical),
        ("high", Severity::Major),
        ("medium", Severity::Major),
        ("low", Severity::Minor),
        ("informational", Severity::Info),
    ]
    .into_iter()
    .map(|(label, severity)| (label.to_string(), severity))
    .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestConfig {
    /// Environment variable naming the CI output file.
    ///
    /// Default: `GITHUB_OUTPUT`
    pub output_env: String,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            output_env: "GITHUB_OUTPUT".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from the first config file found.
    ///
    /// If no config file exists, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_with(None)
    }

    /// Loads configuration from `explicit` if given, otherwise like [`Config::load`].
    ///
    /// An explicit path must exist; the implicit ones fall back to defaults.
    pub fn load_with(explicit: Option<&Path>) -> Result<Self> {
        let path = Self::resolved_path(explicit);
        if explicit.is_none() && !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// The config file a command reads and `config --init` writes:
    /// `explicit` if given, else `./relkit.toml` if it exists, else the user
    /// config file.
    pub fn resolved_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            return local;
        }

        Self::config_path()
    }

    /// Loads configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Saves the configuration to `path`.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("writing config {}", path.display()))?;
        Ok(())
    }

    /// Returns the path to the user configuration file.
    ///
    /// # Example
    ///
    /// ```
    /// use relkit::Config;
    ///
    /// let path = Config::config_path();
    /// println!("Config file: {}", path.display());
    /// ```
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("relkit")
            .join("config.toml")
    }

    /// Generates a string containing the default configuration.
    pub fn generate_default_config() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}
