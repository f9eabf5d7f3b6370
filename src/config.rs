//! Configuration management for rotalog
//!
//! A [`LoggerConfig`] is assembled from defaults, an optional TOML file and an
//! ordered list of [`LoggerOption`]s, then sealed inside a logger. Nothing can
//! change it afterwards.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::logging::Level;

/// Directory used for log files when none is configured
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Frames kept in a stack trace when no depth is configured
pub const DEFAULT_STACK_TRACE_DEPTH: usize = 10;

/// Logger configuration snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Write colorized records to standard output
    pub console_output: bool,

    /// Write plain records to a timestamped file in `log_directory`
    pub file_output: bool,

    /// Directory holding the log files, created on demand
    pub log_directory: PathBuf,

    /// Attach a stack trace to records at or above `stack_trace_threshold`
    pub stack_trace_enabled: bool,

    /// Lowest level that gets a stack trace
    pub stack_trace_threshold: Level,

    /// Maximum frames in a captured stack trace
    pub stack_trace_max_depth: usize,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            console_output: true,
            file_output: false,
            log_directory: PathBuf::from(DEFAULT_LOG_DIR),
            stack_trace_enabled: false,
            stack_trace_threshold: Level::Error,
            stack_trace_max_depth: DEFAULT_STACK_TRACE_DEPTH,
        }
    }
}

impl LoggerConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration from file, or return default if not found
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply options in order
    pub fn with_options(self, options: impl IntoIterator<Item = LoggerOption>) -> Self {
        options
            .into_iter()
            .fold(self, |config, option| option.apply(config))
    }

    /// Whether a record at `level` gets a stack trace
    pub fn wants_stack_trace(&self, level: Level) -> bool {
        self.stack_trace_enabled && level >= self.stack_trace_threshold
    }
}

/// A single optional setting
///
/// Each option touches exactly one field (except [`LoggerOption::StackTrace`],
/// which enables capture and sets its threshold), so applying options in order
/// means the last write wins per field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggerOption {
    ConsoleOutput(bool),
    FileOutput(bool),
    LogDirectory(PathBuf),
    /// Enable stack traces for records at or above this level
    StackTrace(Level),
    StackTraceDepth(usize),
}

impl LoggerOption {
    /// Produce the updated configuration
    pub fn apply(self, mut config: LoggerConfig) -> LoggerConfig {
        match self {
            LoggerOption::ConsoleOutput(enabled) => config.console_output = enabled,
            LoggerOption::FileOutput(enabled) => config.file_output = enabled,
            LoggerOption::LogDirectory(dir) => config.log_directory = dir,
            LoggerOption::StackTrace(level) => {
                config.stack_trace_enabled = true;
                config.stack_trace_threshold = level;
            }
            LoggerOption::StackTraceDepth(depth) => config.stack_trace_max_depth = depth,
        }
        config
    }
}

/// Get the default config file path (`<config dir>/rotalog/config.toml`)
/// Falls back to ./.rotalog/config.toml if the config directory cannot be determined
pub fn default_config_path() -> PathBuf {
    try_config_dir()
        .unwrap_or_else(|| {
            tracing::warn!("Could not determine config directory, using current directory");
            PathBuf::from(".rotalog")
        })
        .join("config.toml")
}

/// Try to get the base configuration directory
pub fn try_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("rotalog"))
}
