//! Logging core for rotalog
//!
//! Renders records at three levels to a colorized console sink and a plain-text
//! file sink, optionally attaches a bounded stack trace, and rotates the log file
//! on request.

mod file_sink;
mod format;
mod level;
mod logger;
mod retention;
mod stack;

pub use file_sink::{log_file_name, LogFile};
pub use format::Record;
pub use level::Level;
pub use logger::{Logger, LoggerBuilder};
pub use retention::{cleanup_old_logs, cleanup_old_logs_with_retention, DEFAULT_RETENTION_DAYS};
pub use stack::{StackFrame, StackTrace};
