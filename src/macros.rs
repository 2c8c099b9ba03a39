//! Logging macros for ergonomic log message formatting.
//!
//! The severity macros take a [`Logger`](crate::Logger) or an
//! [`Entry`](crate::Entry) followed by `format!`-style arguments. The message
//! is formatted only when the record passes the level gate.
//!
//! # Examples
//!
//! ```
//! use fieldlog::{fields, info, warn, with_custom_writer, Logger, SharedBuffer};
//!
//! let buffer = SharedBuffer::new();
//! let logger = Logger::new([with_custom_writer(buffer.clone())]).unwrap();
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! let request = logger.with_fields(fields! { "path" => "/health", "status" => 503 });
//! warn!(request, "upstream unavailable");
//!
//! assert_eq!(buffer.lines().len(), 2);
//! ```

/// Build a [`Fields`](crate::Fields) map from `key => value` pairs.
///
/// ```
/// use fieldlog::{fields, FieldValue};
///
/// let fields = fields! { "user" => "alice", "retries" => 3 };
/// assert_eq!(fields.get("retries"), Some(&FieldValue::Int(3)));
/// assert!(fields! {}.is_empty());
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::Fields::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut fields = $crate::Fields::new();
        $(fields.insert($key, $value);)+
        fields
    }};
}

/// Log a message at an explicit level.
///
/// ```
/// # use fieldlog::{with_custom_writer, Logger, SharedBuffer};
/// # let buffer = SharedBuffer::new();
/// # let logger = Logger::new([with_custom_writer(buffer.clone())]).unwrap();
/// use fieldlog::{log, Level};
/// log!(logger, Level::Info, "Simple message");
/// log!(logger, Level::Error, "Error code: {}", 500);
/// # assert_eq!(buffer.lines().len(), 2);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.logf($level, format_args!($($arg)+))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Warning, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Error, $($arg)+)
    };
}

/// Log a fatal-level message and exit the process.
///
/// ```no_run
/// # use fieldlog::Logger;
/// # let logger = Logger::new([]).unwrap();
/// use fieldlog::fatal;
/// fatal!(logger, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatalf(format_args!($($arg)+))
    };
}
