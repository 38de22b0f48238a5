//! Core data types for versions, audit reports, and normalized issues.
//!
//! - [`SemanticVersion`] - A strict `major.minor.patch` release version
//! - [`VulnerabilityReport`] - The raw `cargo audit --json` input
//! - [`CanonicalIssue`] - One finding in the dashboard's generic issue format
//! - [`Severity`] - The dashboard's four-level severity scale
//!
//! # Example
//!
//! ```
//! use relkit::model::SemanticVersion;
//!
//! let version: SemanticVersion = "1.2.3".parse().unwrap();
//! assert_eq!(version.next_patch().unwrap().to_string(), "1.2.4");
//! ```

mod advisory;
mod issue;
mod version;

pub use advisory::*;
pub use issue::*;
pub use version::*;
