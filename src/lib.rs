pub mod audit;
pub mod commands;
pub mod config;
pub mod digest;
pub mod error;
pub mod model;
pub mod output;
pub mod sync;

pub use audit::Normalizer;
pub use config::Config;
pub use error::{Error, Result};
pub use model::{CanonicalIssue, SemanticVersion, Severity, VulnerabilityReport};
pub use sync::VersionSync;
