//! Main logger implementation

use super::{
    config::{self, Config, LoggerOption},
    context::{Context, ContextParser},
    entry::Entry,
    error::Result,
    fields::{FieldValue, Fields},
    log_level::Level,
    metrics::LoggerMetrics,
    pool::EntryPool,
    settings::LoggerSettings,
    timestamp::TimestampFormat,
};
use parking_lot::RwLock;
use std::fmt;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// State shared by every handle of one logger
pub(crate) struct LoggerShared {
    pub(crate) config: RwLock<Config>,
    pub(crate) pool: EntryPool,
    pub(crate) metrics: Arc<LoggerMetrics>,
}

impl Drop for LoggerShared {
    fn drop(&mut self) {
        // Rotation tasks stop when the configuration goes away
        if let Err(e) = self.config.get_mut().resolved_out().flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }
    }
}

/// Leveled, structured logger.
///
/// Cloning is cheap and every clone writes through the same configuration, so
/// a logger is meant to be constructed once and passed to whoever logs.
///
/// # Example
///
/// ```
/// use fieldlog::{fields, with_custom_writer, with_field_sort, Logger, SharedBuffer};
///
/// let buffer = SharedBuffer::new();
/// let logger = Logger::new([with_custom_writer(buffer.clone()), with_field_sort(true)]).unwrap();
///
/// logger
///     .with_fields(fields! { "user" => "alice", "attempt" => 3 })
///     .warn("login failed");
///
/// let line = buffer.contents();
/// assert!(line.starts_with("WRN "));
/// assert!(line.contains(r#"attempt="3" user="alice" msg="login failed""#));
/// ```
#[derive(Clone)]
pub struct Logger {
    shared: Arc<LoggerShared>,
}

impl Logger {
    /// Apply `options` in order on top of the default configuration.
    ///
    /// The first failing option aborts construction; the error names it.
    pub fn new(options: impl IntoIterator<Item = LoggerOption>) -> Result<Self> {
        let mut config = Config::default();
        for option in options {
            option.apply(&mut config)?;
        }
        config.refresh();

        let metrics = Arc::clone(&config.metrics);
        Ok(Self {
            shared: Arc::new(LoggerShared {
                config: RwLock::new(config),
                pool: EntryPool::default(),
                metrics,
            }),
        })
    }

    /// Logger configured from declarative settings
    pub fn from_settings(settings: LoggerSettings) -> Result<Self> {
        Self::new(settings.into_options())
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// A root entry bound to the current configuration, reused from the pool
    /// when one is idle. Global fields are copied in; nothing from an earlier
    /// use survives.
    pub fn new_entry(&self) -> Entry {
        let mut entry = self.shared.pool.acquire();
        entry.populate(&self.shared, &self.shared.config.read());
        entry
    }

    /// Return a root entry to the pool; it is cleared first
    pub fn release_entry(&self, entry: Entry) {
        self.shared.pool.release(entry);
    }

    #[must_use]
    pub fn with_field(&self, key: impl Into<String>, value: impl Into<FieldValue>) -> Entry {
        let root = self.new_entry();
        let entry = root.with_field(key, value);
        self.release_entry(root);
        entry
    }

    #[must_use]
    pub fn with_fields(&self, fields: Fields) -> Entry {
        let root = self.new_entry();
        let entry = root.with_fields(fields);
        self.release_entry(root);
        entry
    }

    #[must_use]
    pub fn with_context(&self, ctx: Context) -> Entry {
        let root = self.new_entry();
        let entry = root.with_context(ctx);
        self.release_entry(root);
        entry
    }

    /// Emit at fatal level and exit the process with status 1
    #[track_caller]
    pub fn fatal(&self, msg: impl fmt::Display) -> ! {
        self.new_entry().fatal(msg)
    }

    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.new_entry().fatalf(args)
    }

    #[track_caller]
    pub fn error(&self, msg: impl fmt::Display) {
        let entry = self.new_entry();
        entry.error(msg);
        self.release_entry(entry);
    }

    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        let entry = self.new_entry();
        entry.errorf(args);
        self.release_entry(entry);
    }

    #[track_caller]
    pub fn warn(&self, msg: impl fmt::Display) {
        let entry = self.new_entry();
        entry.warn(msg);
        self.release_entry(entry);
    }

    #[track_caller]
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        let entry = self.new_entry();
        entry.warnf(args);
        self.release_entry(entry);
    }

    #[track_caller]
    pub fn info(&self, msg: impl fmt::Display) {
        let entry = self.new_entry();
        entry.info(msg);
        self.release_entry(entry);
    }

    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        let entry = self.new_entry();
        entry.infof(args);
        self.release_entry(entry);
    }

    #[track_caller]
    pub fn debug(&self, msg: impl fmt::Display) {
        let entry = self.new_entry();
        entry.debug(msg);
        self.release_entry(entry);
    }

    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        let entry = self.new_entry();
        entry.debugf(args);
        self.release_entry(entry);
    }

    #[track_caller]
    pub fn log(&self, level: Level, msg: impl fmt::Display) {
        let entry = self.new_entry();
        entry.log(level, msg);
        self.release_entry(entry);
    }

    #[track_caller]
    pub fn logf(&self, level: Level, args: fmt::Arguments<'_>) {
        let entry = self.new_entry();
        entry.logf(level, args);
        self.release_entry(entry);
    }

    /// Current threshold
    pub fn level(&self) -> Level {
        self.shared.config.read().level
    }

    /// Change the threshold for entries issued from now on
    pub fn set_level(&self, level: Level) {
        self.update(|config| config.level = level);
    }

    pub fn set_caller_reporting(&self, enabled: bool) {
        self.update(|config| config.report_caller = enabled);
    }

    /// Same semantics as [`with_time_format`](config::with_time_format)
    pub fn set_time_format(&self, enabled: bool, layout: &str) {
        let format = enabled.then(|| TimestampFormat::from_layout(layout));
        self.update(move |config| config.time_format = format);
    }

    pub fn set_field_sort(&self, enabled: bool) {
        self.update(|config| config.sort_fields = enabled);
    }

    fn update(&self, change: impl FnOnce(&mut Config)) {
        let mut config = self.shared.config.write();
        change(&mut config);
        config.refresh();
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.shared.metrics
    }

    pub fn flush(&self) -> Result<()> {
        let out = Arc::clone(self.shared.config.read().resolved_out());
        out.flush()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("config", &*self.shared.config.read())
            .field("idle_entries", &self.shared.pool.idle())
            .finish()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// Setters record options in call order; `build` applies them exactly as
/// [`Logger::new`] would.
///
/// # Example
/// ```
/// use fieldlog::{Level, Logger, SharedBuffer};
///
/// let buffer = SharedBuffer::new();
/// let logger = Logger::builder()
///     .level(Level::Warning)
///     .custom_writer(buffer.clone())
///     .caller_reporting(false)
///     .build()
///     .unwrap();
///
/// logger.info("dropped");
/// logger.error("kept");
/// assert_eq!(buffer.lines().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct LoggerBuilder {
    options: Vec<LoggerOption>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an arbitrary option
    #[must_use = "builder methods return a new value"]
    pub fn option(mut self, option: LoggerOption) -> Self {
        self.options.push(option);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(self, level: Level) -> Self {
        self.option(config::with_level(level))
    }

    #[must_use = "builder methods return a new value"]
    pub fn global_fields(self, fields: Fields) -> Self {
        self.option(config::with_global_fields(fields))
    }

    #[must_use = "builder methods return a new value"]
    pub fn custom_writer<W: Write + Send + 'static>(self, writer: W) -> Self {
        self.option(config::with_custom_writer(writer))
    }

    #[must_use = "builder methods return a new value"]
    pub fn stdout_mirror(self, enabled: bool) -> Self {
        self.option(config::with_stdout_mirror(enabled))
    }

    #[must_use = "builder methods return a new value"]
    pub fn caller_reporting(self, enabled: bool) -> Self {
        self.option(config::with_caller_reporting(enabled))
    }

    #[must_use = "builder methods return a new value"]
    pub fn time_format(self, enabled: bool, layout: impl Into<String>) -> Self {
        self.option(config::with_time_format(enabled, layout))
    }

    #[must_use = "builder methods return a new value"]
    pub fn file_destination(self, path: impl AsRef<Path>, auto_rotate: bool) -> Self {
        self.option(config::with_file_destination(path, auto_rotate))
    }

    #[must_use = "builder methods return a new value"]
    pub fn context_parser<P: ContextParser + 'static>(self, parser: P) -> Self {
        self.option(config::with_context_parser(parser))
    }

    #[must_use = "builder methods return a new value"]
    pub fn field_sort(self, enabled: bool) -> Self {
        self.option(config::with_field_sort(enabled))
    }

    #[must_use = "builder methods return a new value"]
    pub fn color(self, enabled: bool) -> Self {
        self.option(config::with_color(enabled))
    }

    pub fn build(self) -> Result<Logger> {
        Logger::new(self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::writer::SharedBuffer;
    use crate::core::config::{with_custom_writer, with_global_fields, with_level};

    fn buffered(options: Vec<LoggerOption>) -> (Logger, SharedBuffer) {
        let buffer = SharedBuffer::new();
        let mut all = vec![with_custom_writer(buffer.clone())];
        all.extend(options);
        (Logger::new(all).unwrap(), buffer)
    }

    #[test]
    fn test_default_logger_builds() {
        let logger = Logger::new([]).unwrap();
        assert_eq!(logger.level(), Level::Debug);
    }

    #[test]
    fn test_set_level_affects_new_entries_only() {
        let (logger, buffer) = buffered(vec![]);
        let in_flight = logger.new_entry();

        logger.set_level(Level::Error);
        logger.info("suppressed");
        in_flight.info("still emitted");

        let lines = buffer.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("still emitted"));
    }

    #[test]
    fn test_root_entry_returns_to_pool() {
        let (logger, _buffer) = buffered(vec![]);
        logger.info("one");
        assert_eq!(logger.shared.pool.idle(), 1);

        let chained = logger.with_field("k", "v");
        assert_eq!(logger.shared.pool.idle(), 1);
        assert_eq!(chained.fields().len(), 1);
    }

    #[test]
    fn test_pooled_entry_gets_fresh_globals() {
        let (logger, _buffer) = buffered(vec![with_global_fields(Fields::new().with("g", "v"))]);

        let mut used = logger.new_entry();
        used = used.with_field("stale", true);
        logger.release_entry(used);

        let next = logger.new_entry();
        assert_eq!(next.fields().len(), 1);
        assert!(next.fields().contains_key("g"));
    }

    #[test]
    fn test_metrics_count_emitted_records() {
        let (logger, _buffer) = buffered(vec![with_level(Level::Info)]);
        logger.info("a");
        logger.debug("gated");
        logger.error("b");

        assert_eq!(logger.metrics().total_logged(), 2);
        assert_eq!(logger.metrics().write_failures(), 0);
    }

    #[test]
    fn test_builder_matches_options() {
        let buffer = SharedBuffer::new();
        let logger = Logger::builder()
            .custom_writer(buffer.clone())
            .level(Level::Warning)
            .field_sort(true)
            .build()
            .unwrap();

        assert_eq!(logger.level(), Level::Warning);
        logger.warn("w");
        assert!(buffer.contents().starts_with("WRN "));
    }
}
