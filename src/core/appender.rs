//! Appender trait for log output destinations

use super::error::Result;

/// A destination for rendered records.
///
/// Appenders are shared by every entry created under one configuration and are
/// written from many threads at once, so implementations synchronize internally
/// and each `append` call lands as one uninterrupted write.
pub trait Appender: Send + Sync {
    fn append(&self, record: &[u8]) -> Result<()>;

    fn flush(&self) -> Result<()>;

    fn name(&self) -> &str;

    /// Whether this destination is a terminal that interprets ANSI escapes
    fn is_terminal(&self) -> bool {
        false
    }
}
