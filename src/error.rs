//! Error types for scanning and packaging

use std::path::PathBuf;

use thiserror::Error;

use crate::parser::ParseError;

/// Errors surfaced by the scan pipeline
#[derive(Debug, Error)]
pub enum Error {
    /// A candidate file is not valid source
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// The file
        path: PathBuf,
        /// First syntax error
        #[source]
        source: ParseError,
    },

    /// Filesystem failure on a specific path
    #[error("io error at {path}: {source}")]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Error walking a directory tree
    #[error("walkdir error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Malformed configuration file
    #[error("invalid config {path}: {source}")]
    Config {
        /// Config file path
        path: PathBuf,
        /// Parse failure
        #[source]
        source: toml::de::Error,
    },

    /// The finished archive could not be moved into place
    #[error("failed to persist archive: {0}")]
    Persist(#[from] tempfile::PersistError),

    /// Root path does not exist or is not a directory
    #[error("not a directory: {0}")]
    RootNotFound(PathBuf),
}

impl Error {
    /// Wrap an I/O error with the path it concerns
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for taskpack operations
pub type Result<T> = std::result::Result<T, Error>;
