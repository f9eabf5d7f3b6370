//! Error types for rotalog

use std::io;
use std::path::PathBuf;

/// Result type for logger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by construction, rotation, closing and config loading
///
/// Emitting a record never produces one of these: write failures on an open
/// log file are dropped after a diagnostic.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to create the log directory
    #[error("failed to create log directory at {path}: {source}")]
    CreateDirectory {
        /// The directory that could not be created
        path: PathBuf,
        /// The underlying error
        source: io::Error,
    },

    /// Failed to open (or create) a log file
    #[error("cannot create log file at {path}: {source}")]
    OpenFile {
        /// The file that could not be opened
        path: PathBuf,
        /// The underlying error
        source: io::Error,
    },

    /// Failed to close the previous log file during rotation or close
    #[error("failed to close current log file {path}: {source}")]
    CloseFile {
        /// The file that failed to close
        path: PathBuf,
        /// The underlying error
        source: io::Error,
    },

    /// Rotation was requested on a logger without file output
    #[error("file output is not enabled")]
    FileOutputDisabled,

    /// Failed to read a config file
    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        /// The config file path
        path: PathBuf,
        /// The underlying error
        source: io::Error,
    },

    /// Failed to parse a config file
    #[error("failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Unrecognized level name
    #[error("unknown log level: {0}")]
    UnknownLevel(String),

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Whether this error came from provisioning the log directory or file
    pub fn is_provisioning(&self) -> bool {
        matches!(self, Error::CreateDirectory { .. } | Error::OpenFile { .. })
    }
}
