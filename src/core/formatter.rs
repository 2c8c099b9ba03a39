//! Line rendering for emitted records
//!
//! A rendered line has a fixed shape:
//!
//! ```text
//! LVL [_filepath="file:line" _func="fn"] (_ts="unix" | _fmt_time="...") key="value" ... msg="message"
//! ```
//!
//! Every value is quoted with escaping, so a newline inside a field or the
//! message never starts a second line.

use super::caller::CallSite;
use super::error::{LoggerError, Result};
use super::fields::Fields;
use super::log_level::Level;
use super::timestamp::TimestampFormat;
use chrono::{DateTime, Local};
use std::fmt::{self, Write as _};

pub const FILE_KEY: &str = "_filepath";
pub const FUNC_KEY: &str = "_func";
pub const TIMESTAMP_KEY: &str = "_ts";
pub const FORMAT_TIME_KEY: &str = "_fmt_time";
pub const MESSAGE_KEY: &str = "msg";

/// Fields the facility computes itself at emission time
#[derive(Debug, Clone, PartialEq)]
pub struct FixedFields {
    pub timestamp: DateTime<Local>,
    pub caller: Option<CallSite>,
}

/// One record ready to be rendered
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    pub level: Level,
    pub fixed: &'a FixedFields,
    pub fields: &'a Fields,
    pub message: &'a str,
}

/// Renders a record into the bytes written to a destination
pub trait Formatter: Send + Sync {
    fn format(&self, record: &Record<'_>) -> Result<Vec<u8>>;
}

/// Human-readable `key="value"` formatter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextFormatter {
    is_terminal: bool,
    sort_fields: bool,
    time_format: Option<TimestampFormat>,
}

impl TextFormatter {
    /// `time_format` of `None` renders the raw Unix timestamp under `_ts`
    pub fn new(is_terminal: bool, sort_fields: bool, time_format: Option<TimestampFormat>) -> Self {
        Self {
            is_terminal,
            sort_fields,
            time_format,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.is_terminal
    }

    pub fn sort_fields(&self) -> bool {
        self.sort_fields
    }

    pub fn time_format(&self) -> Option<&TimestampFormat> {
        self.time_format.as_ref()
    }

    fn write_level(&self, line: &mut String, level: Level) {
        // Escape follows the destination, not `colored`'s own tty detection
        if self.is_terminal {
            line.push_str("\x1b[");
            line.push_str(&level.color().to_fg_str());
            line.push('m');
            line.push_str(level.label());
            line.push_str("\x1b[0m");
        } else {
            line.push_str(level.label());
        }
    }

    fn write_fixed(&self, line: &mut String, fixed: &FixedFields) -> Result<()> {
        if let Some(caller) = &fixed.caller {
            append_key_value(line, FILE_KEY, &caller.file_line())?;
            append_key_value(line, FUNC_KEY, &caller.function)?;
        }

        match &self.time_format {
            Some(format) if !format.is_numeric() => {
                append_key_value(line, FORMAT_TIME_KEY, &format.format(&fixed.timestamp))
            }
            _ => append_key_value(
                line,
                TIMESTAMP_KEY,
                &TimestampFormat::Unix.format(&fixed.timestamp),
            ),
        }
    }

    fn write_fields(&self, line: &mut String, fields: &Fields) -> Result<()> {
        if self.sort_fields {
            for (key, value) in fields.sorted() {
                append_key_value(line, key, value)?;
            }
        } else {
            for (key, value) in fields {
                append_key_value(line, key, value)?;
            }
        }
        Ok(())
    }
}

impl Formatter for TextFormatter {
    fn format(&self, record: &Record<'_>) -> Result<Vec<u8>> {
        let mut line = String::with_capacity(128);

        self.write_level(&mut line, record.level);
        self.write_fixed(&mut line, record.fixed)?;
        self.write_fields(&mut line, record.fields)?;
        append_key_value(&mut line, MESSAGE_KEY, &record.message)?;
        line.push('\n');

        Ok(line.into_bytes())
    }
}

/// Append ` key="value"`; the value is rendered first, then quoted
fn append_key_value(line: &mut String, key: &str, value: &dyn fmt::Display) -> Result<()> {
    let mut text = String::new();
    write!(text, "{}", value)
        .map_err(|_| LoggerError::formatter(format!("cannot render value of '{}'", key)))?;

    if !line.is_empty() {
        line.push(' ');
    }
    line.push_str(key);
    line.push('=');
    write!(line, "{:?}", text)
        .map_err(|_| LoggerError::formatter(format!("cannot quote value of '{}'", key)))
}
