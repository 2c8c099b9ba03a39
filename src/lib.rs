//! # fieldlog
//!
//! A structured, leveled logger. Callers attach key/value fields to an entry,
//! pick a severity, and the logger renders one `key="value"` line to its
//! destination: the console, a custom writer, or a file rotated daily.
//!
//! ## Features
//!
//! - **Immutable chaining**: `with_field`/`with_fields`/`with_context` return new entries
//! - **Level gate**: records above the configured threshold cost nothing
//! - **Call sites**: optional `_filepath`/`_func` fields resolved from the stack
//! - **Daily rotation**: per-logger background task, stopped when the logger is dropped
//! - **Thread safe**: entries and loggers are shared freely across threads
//!
//! ## Example
//!
//! ```
//! use fieldlog::{with_custom_writer, with_level, Level, Logger, SharedBuffer};
//!
//! let buffer = SharedBuffer::new();
//! let logger = Logger::new([
//!     with_custom_writer(buffer.clone()),
//!     with_level(Level::Warning),
//! ])
//! .unwrap();
//!
//! logger.info("not written");
//! logger.with_field("disk", "/dev/sda1").warn("almost full");
//!
//! let line = buffer.contents();
//! assert!(line.starts_with("WRN "));
//! assert!(line.contains(r#"disk="/dev/sda1" msg="almost full""#));
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender, SharedBuffer};
    pub use crate::core::{
        with_caller_reporting, with_color, with_context_parser, with_custom_writer,
        with_field_sort, with_file_destination, with_global_fields, with_level,
        with_stdout_mirror, with_time_format, Appender, Context, ContextParser, Entry,
        FieldValue, Fields, FnContextParser, Level, Logger, LoggerBuilder, LoggerError,
        LoggerMetrics, LoggerOption, LoggerSettings, NoopContextParser, Result, TimestampFormat,
    };
}

pub use appenders::{ConsoleAppender, FileAppender, SharedBuffer};
pub use self::core::{
    with_caller_reporting, with_color, with_context_parser, with_custom_writer, with_field_sort,
    with_file_destination, with_global_fields, with_level, with_stdout_mirror, with_time_format,
    Appender, CallSite, Context, ContextParser, Entry, FieldValue, Fields, FnContextParser,
    Formatter, Level, Logger, LoggerBuilder, LoggerError, LoggerMetrics, LoggerOption,
    LoggerSettings, NoopContextParser, Result, TextFormatter, TimestampFormat,
};
