// src/error.rs

//! Error types for ign2rpm

use thiserror::Error;

/// Errors that can occur while loading a config or producing a package
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Download error: {0}")]
    DownloadError(String),

    #[error("Invalid config source: {0}")]
    InvalidSource(String),

    #[error("Unable to decipher config type: {0}")]
    UnrecognizedFormat(String),

    /// One or more files have no content reference. Carries every offending
    /// path so the whole config can be fixed in one pass.
    #[error("Missing content for {} file(s): {}", paths.len(), paths.join(", "))]
    MissingContent { paths: Vec<String> },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Package error: {0}")]
    PackageError(String),

    #[error("Initialization error: {0}")]
    InitError(String),
}

/// Result type alias using the crate error
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err.to_string())
    }
}
