//! On-disk log file management
//!
//! Creates timestamped log files (provisioning the directory on demand), writes
//! plain-text records to them and swaps them on explicit rotation.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::{Error, Result};

/// Timestamp layout used in log file names
pub const FILE_TIME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Extension of every log file
pub const LOG_FILE_SUFFIX: &str = ".log";

#[cfg(unix)]
const DIR_MODE: u32 = 0o755;
#[cfg(unix)]
const FILE_MODE: u32 = 0o644;

/// Generate the log file name for a point in time
///
/// Names have second resolution, so two files created within the same second
/// share a name and the later open appends to the earlier file.
pub fn log_file_name(now: &DateTime<Local>) -> String {
    format!("{}{}", now.format(FILE_TIME_FORMAT), LOG_FILE_SUFFIX)
}

/// The currently open log file
#[derive(Debug)]
pub struct LogFile {
    /// Absolute path to the log file
    path: PathBuf,
    file: File,
}

impl LogFile {
    /// Create (or reopen for append) a log file named after the current time
    pub fn create(logs_dir: &Path) -> Result<Self> {
        create_dir(logs_dir)?;

        let path = absolute(&logs_dir.join(log_file_name(&Local::now())))?;
        let file = open_append(&path).map_err(|source| Error::OpenFile {
            path: path.clone(),
            source,
        })?;

        tracing::debug!("Opened log file {}", path.display());
        Ok(Self { path, file })
    }

    /// Absolute path of this log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one rendered record
    pub fn write_record(&mut self, text: &str) -> std::io::Result<()> {
        self.file.write_all(text.as_bytes())?;
        self.file.flush()
    }

    /// Flush and sync the file, then release the handle
    ///
    /// The handle is released even when syncing fails.
    pub fn close(mut self) -> Result<()> {
        let result = self.file.flush().and_then(|_| self.file.sync_all());
        tracing::debug!("Closed log file {}", self.path.display());
        result.map_err(|source| Error::CloseFile {
            path: self.path,
            source,
        })
    }
}

/// Replace the file in `slot` with a freshly created one
///
/// A close failure is returned before anything new is opened and leaves the slot
/// empty; later writes are skipped until a rotation succeeds.
pub fn rotate(slot: &mut Option<LogFile>, logs_dir: &Path) -> Result<()> {
    if let Some(current) = slot.take() {
        current.close()?;
    }

    let file = LogFile::create(logs_dir)?;
    tracing::debug!("Rotated to log file {}", file.path().display());
    *slot = Some(file);
    Ok(())
}

fn create_dir(dir: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder.create(dir).map_err(|source| Error::CreateDirectory {
        path: dir.to_path_buf(),
        source,
    })
}

fn open_append(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }
    options.open(path)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
