//! Declarative logger settings
//!
//! Settings are plain data (serde) and translate into the same option list a
//! caller would pass to [`Logger::new`](crate::Logger::new).

use super::config::{self, LoggerOption};
use super::error::Result;
use super::fields::Fields;
use super::log_level::Level;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// # Example
///
/// ```
/// use fieldlog::{Level, LoggerSettings};
///
/// let settings = LoggerSettings::from_json(r#"{ "level": "warning", "sort_fields": true }"#).unwrap();
/// assert_eq!(settings.level, Level::Warning);
/// assert!(settings.file.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerSettings {
    pub level: Level,

    /// Write to this file instead of the console
    pub file: Option<PathBuf>,
    pub auto_rotate: bool,

    /// Mirror a file destination to stdout; unset keeps the default
    pub stdout: Option<bool>,
    pub report_caller: bool,

    /// strftime layout for `_fmt_time`; an empty string means RFC 3339
    pub time_format: Option<String>,
    pub sort_fields: bool,
    pub color: Option<bool>,
    pub global_fields: BTreeMap<String, String>,
}

impl LoggerSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn into_options(self) -> Vec<LoggerOption> {
        let mut options = vec![config::with_level(self.level)];

        if !self.global_fields.is_empty() {
            let fields: Fields = self.global_fields.into_iter().collect();
            options.push(config::with_global_fields(fields));
        }
        if let Some(file) = self.file {
            options.push(config::with_file_destination(file, self.auto_rotate));
        }
        if let Some(stdout) = self.stdout {
            options.push(config::with_stdout_mirror(stdout));
        }
        options.push(config::with_caller_reporting(self.report_caller));
        if let Some(layout) = self.time_format {
            options.push(config::with_time_format(true, layout));
        }
        options.push(config::with_field_sort(self.sort_fields));
        if let Some(color) = self.color {
            options.push(config::with_color(color));
        }

        options
    }
}
