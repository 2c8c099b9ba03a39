//! Daily rotation of a file destination
//!
//! A background task checks once per tick whether the calendar day changed
//! since the last rotation. When it did, the active file is renamed to
//! `<path>-YYYYMMDD` (the date of the previous rotation point) and a fresh
//! file is opened at the original path.

use super::file::FileAppender;
use crate::core::error::{LoggerError, Result};
use crate::core::metrics::LoggerMetrics;
use chrono::{DateTime, Local, TimeZone};
use crossbeam_channel::{bounded, select, tick, Sender};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// How often the rotation task checks for a day change
pub const ROTATION_TICK: Duration = Duration::from_secs(60);

/// Date suffix layout for rotated files
pub const ROTATION_DATE_LAYOUT: &str = "%Y%m%d";

/// Whether `now` falls on another calendar day than `last`
///
/// ```
/// use chrono::{Duration, Local, TimeZone};
/// use fieldlog::appenders::rotating_file::should_rotate;
///
/// let last = Local.with_ymd_and_hms(2020, 7, 30, 12, 0, 0).unwrap();
/// assert!(!should_rotate(&last, &last));
/// assert!(should_rotate(&last, &(last + Duration::hours(24))));
/// ```
pub fn should_rotate<Tz: TimeZone>(last: &DateTime<Tz>, now: &DateTime<Tz>) -> bool {
    now.date_naive() != last.date_naive()
}

/// Name the rotated-away file: `app.log` → `app.log-20200730`
pub fn rotate_filename<Tz>(filename: &str, last: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("{}-{}", filename, last.format(ROTATION_DATE_LAYOUT))
}

/// Path the active file is moved to when rotating away from `last`
pub fn rotated_path<Tz>(path: &Path, last: &DateTime<Tz>) -> PathBuf
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "app.log".to_string());
    path.with_file_name(rotate_filename(&filename, last))
}

/// Rotation state for one file destination.
///
/// The last-rotation timestamp belongs to this instance; separate loggers
/// rotating separate files never share it.
pub struct DailyRotation {
    file: Arc<FileAppender>,
    last_rotation: Mutex<DateTime<Local>>,
    metrics: Arc<LoggerMetrics>,
}

impl DailyRotation {
    pub fn new(file: Arc<FileAppender>, metrics: Arc<LoggerMetrics>) -> Self {
        Self::with_last_rotation(file, metrics, Local::now())
    }

    pub fn with_last_rotation(
        file: Arc<FileAppender>,
        metrics: Arc<LoggerMetrics>,
        last_rotation: DateTime<Local>,
    ) -> Self {
        Self {
            file,
            last_rotation: Mutex::new(last_rotation),
            metrics,
        }
    }

    pub fn last_rotation(&self) -> DateTime<Local> {
        *self.last_rotation.lock()
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// One tick: rotate if `now` is on a new day. Returns whether a rotation happened.
    ///
    /// Failures are reported on stderr and counted; the next tick retries.
    pub fn check(&self, now: DateTime<Local>) -> bool {
        if !should_rotate(&self.last_rotation(), &now) {
            return false;
        }

        match self.rotate_now(now) {
            Ok(_) => {
                self.metrics.record_rotation();
                true
            }
            Err(e) => {
                self.metrics.record_rotation_failure();
                eprintln!("[LOGGER ERROR] {}. Retrying on next tick.", e);
                false
            }
        }
    }

    /// Rename the active file after the previous rotation date, reopen the
    /// original path, and record `now` as the new rotation point.
    pub fn rotate_now(&self, now: DateTime<Local>) -> Result<PathBuf> {
        let mut last = self.last_rotation.lock();
        let rotated = rotated_path(self.file.path(), &*last);
        self.file.rotate_to(&rotated)?;
        *last = now;
        Ok(rotated)
    }

    /// Start the periodic task. It runs until the returned handle is dropped.
    pub fn spawn(self: Arc<Self>, interval: Duration) -> Result<RotationTask> {
        let (shutdown, stop) = bounded::<()>(0);
        let name = format!("fieldlog-rotate:{}", self.path().display());

        let handle = thread::Builder::new()
            .name(name)
            .spawn(move || {
                let ticker = tick(interval);
                loop {
                    select! {
                        recv(ticker) -> _ => {
                            self.check(Local::now());
                        }
                        // Disconnects when the owning task handle is dropped
                        recv(stop) -> _ => break,
                    }
                }
            })
            .map_err(|e| LoggerError::io_operation("starting rotation task", "spawn failed", e))?;

        Ok(RotationTask {
            shutdown: Some(shutdown),
            handle: Some(handle),
        })
    }
}

/// Owner of a running rotation task; dropping it stops and joins the task
pub struct RotationTask {
    shutdown: Option<Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl RotationTask {
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for RotationTask {
    fn drop(&mut self) {
        drop(self.shutdown.take());

        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.join() {
                eprintln!("[LOGGER ERROR] Rotation task panicked during shutdown: {:?}", e);
            }
        }
    }
}
