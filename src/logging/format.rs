//! Rendering of a single log record
//!
//! Every record renders twice: once with ANSI colors for the console and once as
//! plain text for the log file. Both share the layout
//! `[LEVEL] YYYY-MM-DD HH:MM:SS - file:line: message` followed by the optional
//! stack trace block.

use std::panic::Location;
use std::path::Path;

use chrono::{DateTime, Local};

use super::level::{Level, COLOR_RESET};
use super::stack::{base_name, StackTrace};

/// Timestamp layout used inside records
const RECORD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A log event built fresh for each emit call
#[derive(Debug, Clone)]
pub struct Record {
    pub level: Level,
    pub timestamp: DateTime<Local>,
    /// Caller location as `file:line`
    pub location: String,
    pub message: String,
    pub stack: Option<StackTrace>,
}

impl Record {
    /// Create a record stamped with the current local time
    pub fn new(
        level: Level,
        location: &Location<'_>,
        message: impl Into<String>,
        stack: Option<StackTrace>,
    ) -> Self {
        Self {
            level,
            timestamp: Local::now(),
            location: format_location(location),
            message: message.into(),
            stack,
        }
    }

    /// Render with the bracketed level wrapped in its ANSI color
    pub fn render_colored(&self) -> String {
        self.render(self.level.color(), COLOR_RESET)
    }

    /// Render without any escape sequences
    pub fn render_plain(&self) -> String {
        self.render("", "")
    }

    fn render(&self, color: &str, reset: &str) -> String {
        let mut out = format!(
            "{}[{}]{} {} - {}: {}",
            color,
            self.level,
            reset,
            self.timestamp.format(RECORD_TIME_FORMAT),
            self.location,
            self.message
        );
        match &self.stack {
            // The stack block already ends with a newline
            Some(stack) => out.push_str(&stack.to_string()),
            None => out.push('\n'),
        }
        out
    }
}

/// Format a caller location as `file:line` using the file's base name
pub fn format_location(location: &Location<'_>) -> String {
    let file = base_name(Path::new(location.file()))
        .unwrap_or_else(|| location.file().to_string());
    format!("{}:{}", file, location.line())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::stack::StackFrame;
    use chrono::TimeZone;

    fn record(level: Level, stack: Option<StackTrace>) -> Record {
        Record {
            level,
            timestamp: Local.with_ymd_and_hms(2026, 1, 21, 14, 30, 45).unwrap(),
            location: "main.rs:42".to_string(),
            message: "disk almost full".to_string(),
            stack,
        }
    }

    #[test]
    fn test_render_plain() {
        let rendered = record(Level::Warning, None).render_plain();
        assert_eq!(
            rendered,
            "[WARNING] 2026-01-21 14:30:45 - main.rs:42: disk almost full\n"
        );
    }

    #[test]
    fn test_render_colored() {
        let rendered = record(Level::Error, None).render_colored();
        assert_eq!(
            rendered,
            "\x1b[31m[ERROR]\x1b[0m 2026-01-21 14:30:45 - main.rs:42: disk almost full\n"
        );
    }

    #[test]
    fn test_render_with_stack() {
        let stack = StackTrace {
            frames: vec![StackFrame {
                file: "worker.rs".to_string(),
                line: 9,
                function: "run".to_string(),
            }],
        };
        let rendered = record(Level::Error, Some(stack)).render_plain();
        assert_eq!(
            rendered,
            "[ERROR] 2026-01-21 14:30:45 - main.rs:42: disk almost full\nStack Trace:\n\tworker.rs:9 - run\n"
        );
    }

    #[test]
    fn test_colored_and_plain_share_text() {
        let r = record(Level::Info, None);
        let stripped = r
            .render_colored()
            .replace(Level::Info.color(), "")
            .replace(COLOR_RESET, "");
        assert_eq!(stripped, r.render_plain());
    }

    #[test]
    fn test_format_location_uses_base_name() {
        let location = Location::caller();
        let formatted = format_location(location);
        assert!(formatted.starts_with("format.rs:"));
    }
}
