//! Log level definitions

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a record.
///
/// Lower value means higher severity: `Fatal < Error < Warning < Info < Debug`.
/// A logger configured with threshold `T` emits a record at level `L` iff `T >= L`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Level {
    Fatal = 0,
    Error = 1,
    Warning = 2,
    Info = 3,
    #[default]
    Debug = 4,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::Fatal,
        Level::Error,
        Level::Warning,
        Level::Info,
        Level::Debug,
    ];

    /// Three-letter label rendered at the head of every line
    pub fn label(&self) -> &'static str {
        match self {
            Level::Fatal => "FTL",
            Level::Error => "ERR",
            Level::Warning => "WRN",
            Level::Info => "INF",
            Level::Debug => "DBG",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Level::Fatal => "fatal",
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Info => "info",
            Level::Debug => "debug",
        }
    }

    /// SGR color code used when the destination is a terminal
    pub fn ansi_code(&self) -> u8 {
        match self {
            Level::Fatal => 35,
            Level::Error => 31,
            Level::Warning => 33,
            Level::Info => 32,
            Level::Debug => 36,
        }
    }

    pub fn color(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Level::Fatal => Magenta,
            Level::Error => Red,
            Level::Warning => Yellow,
            Level::Info => Green,
            Level::Debug => Cyan,
        }
    }

    #[inline]
    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn from_code(code: u8) -> Option<Level> {
        Level::ALL.get(usize::from(code)).copied()
    }

    /// Label for a raw level code, `"unknown"` when the code names no level
    pub fn label_for_code(code: u8) -> &'static str {
        Level::from_code(code).map_or("unknown", |level| level.label())
    }

    /// Color code for a raw level code, `0` (reset) when the code names no level
    pub fn ansi_code_for_code(code: u8) -> u8 {
        Level::from_code(code).map_or(0, |level| level.ansi_code())
    }

    /// Whether a logger gated at `self` lets a record at `level` through
    #[inline]
    pub fn allows(&self, level: Level) -> bool {
        *self >= level
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fatal" | "ftl" => Ok(Level::Fatal),
            "error" | "err" => Ok(Level::Error),
            "warning" | "warn" | "wrn" => Ok(Level::Warning),
            "info" | "inf" => Ok(Level::Info),
            "debug" | "dbg" => Ok(Level::Debug),
            _ => Err(LoggerError::InvalidLevel(s.to_string())),
        }
    }
}
