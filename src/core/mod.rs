//! Core logger types and traits

pub mod appender;
pub mod caller;
pub mod config;
pub mod context;
pub mod entry;
pub mod error;
pub mod fields;
pub mod formatter;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod pool;
pub mod settings;
pub mod timestamp;

pub use appender::Appender;
pub use caller::CallSite;
pub use config::{
    with_caller_reporting, with_color, with_context_parser, with_custom_writer,
    with_field_sort, with_file_destination, with_global_fields, with_level, with_stdout_mirror,
    with_time_format, LoggerOption,
};
pub use context::{Context, ContextParser, FnContextParser, NoopContextParser};
pub use entry::Entry;
pub use error::{LoggerError, Result};
pub use fields::{FieldValue, Fields};
pub use formatter::{FixedFields, Formatter, Record, TextFormatter};
pub use log_level::Level;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use settings::LoggerSettings;
pub use timestamp::TimestampFormat;
