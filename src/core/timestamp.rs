//! Timestamp rendering for the fixed `_ts` / `_fmt_time` fields

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

/// strftime layout equivalent to RFC 3339 with seconds precision
pub const RFC3339_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// How the record timestamp is rendered
///
/// # Examples
///
/// ```
/// use fieldlog::TimestampFormat;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2020, 7, 30, 8, 0, 0).unwrap();
/// assert_eq!(TimestampFormat::Unix.format(&at), "1596096000");
/// assert_eq!(TimestampFormat::from_layout("").format(&at), "2020-07-30T08:00:00+00:00");
/// assert_eq!(TimestampFormat::from_layout("%Y/%m/%d").format(&at), "2020/07/30");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Raw Unix timestamp in seconds: `1596096000`
    #[default]
    Unix,

    /// RFC 3339: `2020-07-30T08:00:00+08:00`
    Rfc3339,

    /// Custom strftime layout
    Custom(String),
}

impl TimestampFormat {
    /// Layout for a formatted-time option; an empty layout means RFC 3339
    pub fn from_layout(layout: &str) -> Self {
        if layout.is_empty() {
            TimestampFormat::Rfc3339
        } else {
            TimestampFormat::Custom(layout.to_string())
        }
    }

    #[must_use]
    pub fn format<Tz>(&self, datetime: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        match self {
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::Rfc3339 => datetime.format(RFC3339_LAYOUT).to_string(),
            TimestampFormat::Custom(layout) => datetime.format(layout).to_string(),
        }
    }

    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, TimestampFormat::Unix)
    }
}
