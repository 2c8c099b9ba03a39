//! File appender implementation

use crate::core::{Appender, LoggerError, Result};
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Suffix appended to destination file names that lack it
pub const LOG_SUFFIX: &str = ".log";

/// Join `dir` and `filename`, appending `.log` when `auto_suffix` is set and
/// the name does not already end with it.
///
/// ```
/// use fieldlog::appenders::file::assemble_filename;
/// use std::path::Path;
///
/// assert_eq!(assemble_filename("/var/log", "app", true), Path::new("/var/log/app.log"));
/// assert_eq!(assemble_filename("/var/log", "app.log", true), Path::new("/var/log/app.log"));
/// assert_eq!(assemble_filename("/var/log", "app", false), Path::new("/var/log/app"));
/// ```
pub fn assemble_filename(dir: impl AsRef<Path>, filename: &str, auto_suffix: bool) -> PathBuf {
    if auto_suffix && !filename.ends_with(LOG_SUFFIX) {
        dir.as_ref().join(format!("{}{}", filename, LOG_SUFFIX))
    } else {
        dir.as_ref().join(filename)
    }
}

/// Open `path` for appending, creating it and its parent directories if absent
pub fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| LoggerError::open_file(parent.display().to_string(), e))?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LoggerError::open_file(path.display().to_string(), e))
}

/// File destination whose handle can be swapped while writers are active.
///
/// Writes and handle swaps take the same lock, so a record is written either
/// entirely to the old file or entirely to the new one.
#[derive(Debug)]
pub struct FileAppender {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileAppender {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = open_log_file(&path)?;

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Move the active file to `rotated` and continue in a fresh file at the
    /// original path.
    ///
    /// If the rename succeeds but reopening fails, writes keep going to the
    /// handle of the renamed file. The next attempt finds the original path
    /// gone and only reopens it.
    pub fn rotate_to(&self, rotated: &Path) -> Result<()> {
        let mut file = self.file.lock();

        if self.path.exists() {
            fs::rename(&self.path, rotated).map_err(|e| {
                LoggerError::file_rotation(
                    self.path.display().to_string(),
                    format!("rename to '{}' failed: {}", rotated.display(), e),
                )
            })?;
        }

        let fresh = open_log_file(&self.path).map_err(|e| {
            LoggerError::file_rotation(self.path.display().to_string(), e.to_string())
        })?;
        *file = fresh;

        Ok(())
    }
}

impl Appender for FileAppender {
    fn append(&self, record: &[u8]) -> Result<()> {
        self.file.lock().write_all(record).map_err(|e| {
            LoggerError::io_operation(
                "writing log file",
                format!("cannot write to '{}'", self.path.display()),
                e,
            )
        })
    }

    fn flush(&self) -> Result<()> {
        self.file.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}
