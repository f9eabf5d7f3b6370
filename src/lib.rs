//! rotalog - multi-sink logger with stack traces and explicit file rotation
//!
//! ```no_run
//! use rotalog::{Level, Logger};
//!
//! let logger = Logger::builder()
//!     .file_output(true)
//!     .log_directory("logs")
//!     .stack_trace(Level::Warning)
//!     .stack_trace_depth(5)
//!     .build()?;
//!
//! logger.info("service started");
//! logger.warn("cache miss rate is high");
//! logger.rotate()?;
//! logger.close()?;
//! # Ok::<(), rotalog::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod logging;

pub use config::{LoggerConfig, LoggerOption};
pub use error::{Error, Result};
pub use logging::{Level, Logger, LoggerBuilder};
