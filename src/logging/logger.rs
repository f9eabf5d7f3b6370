//! The logger facade
//!
//! Holds the sealed configuration plus the live sinks, and routes every record
//! to the console and/or the current log file.

use std::fmt;
use std::io::{self, Write};
use std::panic::Location;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::file_sink::{self, LogFile};
use super::format::Record;
use super::level::Level;
use super::retention;
use super::stack;
use crate::config::{LoggerConfig, LoggerOption};
use crate::error::{Error, Result};

/// Symbol-name prefix of every `Logger` method, skipped when capturing stacks
const LOGGER_FRAMES: &str = concat!(module_path!(), "::Logger::");

/// Destinations guarded together so a write never races a rotation
struct Sinks {
    console: Box<dyn Write + Send>,
    file: Option<LogFile>,
}

/// A configured logger with console and file sinks
///
/// All operations are synchronous. A single lock serializes record writes with
/// rotation and closing, so a `Logger` can be shared across threads.
pub struct Logger {
    config: LoggerConfig,
    sinks: Mutex<Sinks>,
}

impl Logger {
    /// Create a logger from defaults and the given options, applied in order
    pub fn new(options: impl IntoIterator<Item = LoggerOption>) -> Result<Self> {
        LoggerBuilder::new().options(options).build()
    }

    /// Create a logger from an already assembled configuration
    pub fn from_config(config: LoggerConfig) -> Result<Self> {
        LoggerBuilder::from_config(config).build()
    }

    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Emit a record at `level`
    ///
    /// Never fails. When file output is enabled but no file is open (after a
    /// failed rotation or a close) the file write is skipped.
    #[track_caller]
    pub fn emit(&self, level: Level, message: &str) {
        let location = Location::caller();
        // Captured directly here: any helper frame in between would be reported
        let stack = if self.config.wants_stack_trace(level) {
            Some(stack::capture(
                self.config.stack_trace_max_depth,
                &[LOGGER_FRAMES],
            ))
        } else {
            None
        };
        let record = Record::new(level, location, message, stack);
        self.dispatch(&record);
    }

    #[track_caller]
    pub fn info(&self, message: &str) {
        self.emit(Level::Info, message);
    }

    #[track_caller]
    pub fn warn(&self, message: &str) {
        self.emit(Level::Warning, message);
    }

    #[track_caller]
    pub fn error(&self, message: &str) {
        self.emit(Level::Error, message);
    }

    /// Absolute path of the open log file, if any
    pub fn current_log_file_path(&self) -> Option<PathBuf> {
        self.sinks().file.as_ref().map(|f| f.path().to_path_buf())
    }

    /// Close the current log file and open a new one
    ///
    /// Two rotations within the same second resolve to the same file name, in
    /// which case the new handle appends to the previous file.
    pub fn rotate(&self) -> Result<()> {
        if !self.config.file_output {
            return Err(Error::FileOutputDisabled);
        }
        let mut sinks = self.sinks();
        file_sink::rotate(&mut sinks.file, &self.config.log_directory)
    }

    /// Close the current log file; a no-op when none is open
    pub fn close(&self) -> Result<()> {
        match self.sinks().file.take() {
            Some(file) => file.close(),
            None => Ok(()),
        }
    }

    /// Delete log files in the configured directory older than `retention_days`
    ///
    /// The open log file is never removed. Returns the number of files deleted.
    pub fn cleanup_old_logs(&self, retention_days: u64) -> Result<usize> {
        let current = self.current_log_file_path();
        retention::cleanup_old_logs_with_retention(
            &self.config.log_directory,
            retention_days,
            current.as_deref(),
        )
    }

    fn dispatch(&self, record: &Record) {
        let mut sinks = self.sinks();

        if self.config.console_output {
            if let Err(e) = write_console(sinks.console.as_mut(), &record.render_colored()) {
                tracing::warn!("Failed to write log record to console: {}", e);
            }
        }

        if self.config.file_output {
            if let Some(file) = sinks.file.as_mut() {
                if let Err(e) = file.write_record(&record.render_plain()) {
                    tracing::warn!(
                        "Failed to write log record to {}: {}",
                        file.path().display(),
                        e
                    );
                }
            }
        }
    }

    // A panic while holding the lock cannot leave the sinks half-updated
    fn sinks(&self) -> MutexGuard<'_, Sinks> {
        self.sinks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("config", &self.config)
            .field("current_log_file", &self.current_log_file_path())
            .finish_non_exhaustive()
    }
}

fn write_console(console: &mut dyn Write, text: &str) -> io::Result<()> {
    console.write_all(text.as_bytes())?;
    console.flush()
}

/// Accumulates options and seals them into a [`Logger`]
pub struct LoggerBuilder {
    config: LoggerConfig,
    options: Vec<LoggerOption>,
    console: Option<Box<dyn Write + Send>>,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self::from_config(LoggerConfig::default())
    }

    /// Start from a loaded configuration instead of the defaults
    pub fn from_config(config: LoggerConfig) -> Self {
        Self {
            config,
            options: Vec::new(),
            console: None,
        }
    }

    pub fn option(mut self, option: LoggerOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn options(mut self, options: impl IntoIterator<Item = LoggerOption>) -> Self {
        self.options.extend(options);
        self
    }

    pub fn console_output(self, enabled: bool) -> Self {
        self.option(LoggerOption::ConsoleOutput(enabled))
    }

    pub fn file_output(self, enabled: bool) -> Self {
        self.option(LoggerOption::FileOutput(enabled))
    }

    pub fn log_directory(self, dir: impl Into<PathBuf>) -> Self {
        self.option(LoggerOption::LogDirectory(dir.into()))
    }

    /// Enable stack traces for records at or above `level`
    pub fn stack_trace(self, level: Level) -> Self {
        self.option(LoggerOption::StackTrace(level))
    }

    pub fn stack_trace_depth(self, depth: usize) -> Self {
        self.option(LoggerOption::StackTraceDepth(depth))
    }

    /// Send console output somewhere other than stdout
    pub fn console_writer(mut self, writer: impl Write + Send + 'static) -> Self {
        self.console = Some(Box::new(writer));
        self
    }

    /// Apply the options and open the first log file if file output is enabled
    pub fn build(self) -> Result<Logger> {
        let config = self.config.with_options(self.options);

        let file = if config.file_output {
            Some(LogFile::create(&config.log_directory)?)
        } else {
            None
        };

        let console = self
            .console
            .unwrap_or_else(|| Box::new(io::stdout()) as Box<dyn Write + Send>);

        Ok(Logger {
            config,
            sinks: Mutex::new(Sinks { console, file }),
        })
    }
}
