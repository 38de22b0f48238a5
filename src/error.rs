//! Error type shared by the version sync, digest and normalizer engines.
//!
//! Malformed audit input is deliberately absent here: the normalizer turns
//! it into an empty report (see [`crate::audit::LoadedReport`]).

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid semver version: {value}")]
    InvalidVersion { value: String },

    #[error("failed to find version {value} in {}", .path.display())]
    DeclarationNotFound { path: PathBuf, value: String },

    #[error(
        "version {value} is declared {count} times in {}; refusing to guess which one to bump",
        .path.display()
    )]
    AmbiguousDeclaration {
        path: PathBuf,
        value: String,
        count: usize,
    },

    #[error(
        "failed to find {package} version {value} in {} ({count} matches)",
        .path.display()
    )]
    LockMismatch {
        path: PathBuf,
        package: String,
        value: String,
        count: usize,
    },

    #[error(
        "cannot tell which lock entry to update: no package name configured and none found in {}",
        .path.display()
    )]
    PackageNameUnknown { path: PathBuf },

    #[error("failed to write {}", .path.display())]
    OutputIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Lockfile not found: {}", .path.display())]
    LockfileNotFound { path: PathBuf },

    #[error("Failed to write to CI output {}", .path.display())]
    CiOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid search pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("I/O error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
