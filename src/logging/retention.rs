//! Log file retention management
//!
//! Deletes old log files on request. Nothing here runs automatically.

use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use chrono::NaiveDateTime;

use super::file_sink::{FILE_TIME_FORMAT, LOG_FILE_SUFFIX};
use crate::error::Result;

/// Default retention period in days
pub const DEFAULT_RETENTION_DAYS: u64 = 7;

/// Clean up log files older than the default retention period
///
/// Returns the number of files deleted.
pub fn cleanup_old_logs(logs_dir: &Path) -> Result<usize> {
    cleanup_old_logs_with_retention(logs_dir, DEFAULT_RETENTION_DAYS, None)
}

/// Clean up log files older than the specified number of days
///
/// Only files named like `2026-01-21_14-30-45.log` are considered, and `keep`
/// (the file currently being written) is never removed. Returns the number of
/// files deleted.
pub fn cleanup_old_logs_with_retention(
    logs_dir: &Path,
    retention_days: u64,
    keep: Option<&Path>,
) -> Result<usize> {
    if !logs_dir.exists() {
        return Ok(0);
    }

    let retention_duration = Duration::from_secs(retention_days.saturating_mul(24 * 60 * 60));
    let cutoff = SystemTime::now()
        .checked_sub(retention_duration)
        .unwrap_or(SystemTime::UNIX_EPOCH);

    let mut deleted_count = 0;

    for entry in fs::read_dir(logs_dir)? {
        let entry = entry?;
        let path = entry.path();

        match path.file_name().and_then(|n| n.to_str()) {
            Some(name) if is_log_file_name(name) => {}
            _ => continue,
        }
        if keep.is_some_and(|k| k.file_name() == path.file_name()) {
            continue;
        }

        if let Ok(metadata) = entry.metadata() {
            if let Ok(modified) = metadata.modified() {
                if modified < cutoff {
                    match fs::remove_file(&path) {
                        Ok(()) => deleted_count += 1,
                        Err(e) => {
                            tracing::warn!("Failed to remove old log {}: {}", path.display(), e)
                        }
                    }
                }
            }
        }
    }

    if deleted_count > 0 {
        tracing::debug!("Removed {} old log files from {}", deleted_count, logs_dir.display());
    }
    Ok(deleted_count)
}

fn is_log_file_name(name: &str) -> bool {
    name.strip_suffix(LOG_FILE_SUFFIX)
        .is_some_and(|stem| NaiveDateTime::parse_from_str(stem, FILE_TIME_FORMAT).is_ok())
}
