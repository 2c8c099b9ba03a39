//! Logger configuration and the options that build it
//!
//! A configuration starts from a fixed baseline (console destination, debug
//! threshold, no global fields, color on, stdout mirror on, caller reporting
//! off) and is shaped by an ordered list of [`LoggerOption`]s. Options apply in
//! the order given; a later option touching the same setting wins. The first
//! option that fails aborts construction with its name attached.

use super::appender::Appender;
use super::context::{ContextParser, NoopContextParser};
use super::error::{LoggerError, Result};
use super::fields::Fields;
use super::formatter::{Formatter, TextFormatter};
use super::log_level::Level;
use super::metrics::LoggerMetrics;
use super::timestamp::TimestampFormat;
use crate::appenders::console::ConsoleAppender;
use crate::appenders::file::{assemble_filename, FileAppender};
use crate::appenders::mirror::MirrorAppender;
use crate::appenders::rotating_file::{DailyRotation, RotationTask, ROTATION_TICK};
use crate::appenders::writer::WriterAppender;
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Resolved logger configuration
pub struct Config {
    pub(crate) writer: Arc<dyn Appender>,
    pub(crate) level: Level,
    pub(crate) global_fields: Fields,
    /// Destination is the process console rather than a file or custom sink
    pub(crate) console: bool,
    pub(crate) color: bool,
    /// Mirror a non-console destination to stdout
    pub(crate) stdout: bool,
    pub(crate) report_caller: bool,
    pub(crate) time_format: Option<TimestampFormat>,
    pub(crate) sort_fields: bool,
    pub(crate) context_parser: Arc<dyn ContextParser>,
    pub(crate) metrics: Arc<LoggerMetrics>,
    rotation_tasks: Vec<RotationTask>,

    resolved_out: Arc<dyn Appender>,
    formatter: Arc<dyn Formatter>,
}

impl Config {
    /// Recompute the destination and formatter from the current settings
    pub(crate) fn refresh(&mut self) {
        let out: Arc<dyn Appender> = if self.stdout && !self.console {
            let console: Arc<dyn Appender> = Arc::new(ConsoleAppender::stdout());
            Arc::new(MirrorAppender::new(vec![console, Arc::clone(&self.writer)]))
        } else {
            Arc::clone(&self.writer)
        };
        self.resolved_out = out;

        let is_terminal = self.color && self.resolved_out.is_terminal();
        self.formatter = Arc::new(TextFormatter::new(
            is_terminal,
            self.sort_fields,
            self.time_format.clone(),
        ));
    }

    pub(crate) fn resolved_out(&self) -> &Arc<dyn Appender> {
        &self.resolved_out
    }

    pub(crate) fn formatter(&self) -> &Arc<dyn Formatter> {
        &self.formatter
    }

    #[cfg(test)]
    pub(crate) fn rotation_tasks(&self) -> usize {
        self.rotation_tasks.len()
    }

    fn replace_writer(&mut self, writer: Arc<dyn Appender>) {
        self.writer = writer;
        // Rotation belongs to the destination it was started for
        self.rotation_tasks.clear();
    }
}

impl Default for Config {
    fn default() -> Self {
        let writer: Arc<dyn Appender> = Arc::new(ConsoleAppender::stdout());
        let mut config = Self {
            writer: Arc::clone(&writer),
            level: Level::Debug,
            global_fields: Fields::new(),
            console: true,
            color: true,
            stdout: true,
            report_caller: false,
            time_format: None,
            sort_fields: false,
            context_parser: Arc::new(NoopContextParser),
            metrics: Arc::new(LoggerMetrics::new()),
            rotation_tasks: Vec::new(),
            resolved_out: writer,
            formatter: Arc::new(TextFormatter::default()),
        };
        config.refresh();
        config
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("destination", &self.writer.name())
            .field("level", &self.level)
            .field("global_fields", &self.global_fields)
            .field("console", &self.console)
            .field("color", &self.color)
            .field("stdout", &self.stdout)
            .field("report_caller", &self.report_caller)
            .field("time_format", &self.time_format)
            .field("sort_fields", &self.sort_fields)
            .field("context_field", &self.context_parser.field_name())
            .field("rotation_tasks", &self.rotation_tasks.len())
            .finish()
    }
}

type ApplyFn = dyn FnOnce(&mut Config) -> Result<()> + Send;

/// One named configuration step
pub struct LoggerOption {
    name: &'static str,
    apply: Box<ApplyFn>,
}

impl LoggerOption {
    pub(crate) fn new<F>(name: &'static str, apply: F) -> Self
    where
        F: FnOnce(&mut Config) -> Result<()> + Send + 'static,
    {
        Self {
            name,
            apply: Box::new(apply),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn apply(self, config: &mut Config) -> Result<()> {
        (self.apply)(config).map_err(|e| LoggerError::option(self.name, e))
    }
}

impl fmt::Debug for LoggerOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LoggerOption").field(&self.name).finish()
    }
}

/// Minimum severity emitted
pub fn with_level(level: Level) -> LoggerOption {
    LoggerOption::new("with_level", move |config| {
        config.level = level;
        Ok(())
    })
}

/// Fields merged into every entry the logger issues
pub fn with_global_fields(fields: Fields) -> LoggerOption {
    LoggerOption::new("with_global_fields", move |config| {
        config.global_fields = fields;
        Ok(())
    })
}

/// Write to `writer` instead of the console.
///
/// A custom sink is never a terminal; color and the stdout mirror are turned
/// off (a later `with_stdout_mirror(true)` turns mirroring back on).
pub fn with_custom_writer<W>(writer: W) -> LoggerOption
where
    W: Write + Send + 'static,
{
    LoggerOption::new("with_custom_writer", move |config| {
        config.replace_writer(Arc::new(WriterAppender::new(writer)));
        config.console = false;
        config.color = false;
        config.stdout = false;
        Ok(())
    })
}

/// Also write to stdout when the destination is not the console
pub fn with_stdout_mirror(enabled: bool) -> LoggerOption {
    LoggerOption::new("with_stdout_mirror", move |config| {
        config.stdout = enabled;
        Ok(())
    })
}

pub fn with_caller_reporting(enabled: bool) -> LoggerOption {
    LoggerOption::new("with_caller_reporting", move |config| {
        config.report_caller = enabled;
        Ok(())
    })
}

/// Render `_fmt_time` with a strftime `layout` instead of `_ts`; an empty
/// layout means RFC 3339.
pub fn with_time_format(enabled: bool, layout: impl Into<String>) -> LoggerOption {
    let layout = layout.into();
    LoggerOption::new("with_time_format", move |config| {
        config.time_format = enabled.then(|| TimestampFormat::from_layout(&layout));
        Ok(())
    })
}

/// Write to the file at `path` (absolute-resolved, `.log` appended when
/// missing), creating it and its directories as needed. With `auto_rotate`
/// the file is rotated daily until the logger is dropped.
pub fn with_file_destination(path: impl AsRef<Path>, auto_rotate: bool) -> LoggerOption {
    let path = path.as_ref().to_path_buf();
    LoggerOption::new("with_file_destination", move |config| {
        let target = resolve_destination(&path)?;
        let file = Arc::new(FileAppender::new(target)?);

        let writer: Arc<dyn Appender> = Arc::clone(&file) as Arc<dyn Appender>;
        config.replace_writer(writer);
        config.console = false;
        config.color = false;

        if auto_rotate {
            let rotation = Arc::new(DailyRotation::new(file, Arc::clone(&config.metrics)));
            config.rotation_tasks.push(rotation.spawn(ROTATION_TICK)?);
        }
        Ok(())
    })
}

/// Strategy turning an attached context into a field
pub fn with_context_parser<P>(parser: P) -> LoggerOption
where
    P: ContextParser + 'static,
{
    LoggerOption::new("with_context_parser", move |config| {
        config.context_parser = Arc::new(parser);
        Ok(())
    })
}

/// Render dynamic fields in lexicographic key order
pub fn with_field_sort(enabled: bool) -> LoggerOption {
    LoggerOption::new("with_field_sort", move |config| {
        config.sort_fields = enabled;
        Ok(())
    })
}

/// Color the level label when the destination is a terminal
pub fn with_color(enabled: bool) -> LoggerOption {
    LoggerOption::new("with_color", move |config| {
        config.color = enabled;
        Ok(())
    })
}

/// Absolute destination path with the `.log` suffix applied
fn resolve_destination(path: &Path) -> Result<PathBuf> {
    let raw = path.display().to_string();
    let abs = std::path::absolute(path).map_err(|e| LoggerError::resolve_path(&raw, e))?;

    let (Some(dir), Some(filename)) = (abs.parent(), abs.file_name()) else {
        return Err(LoggerError::resolve_path(
            raw,
            io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
        ));
    };

    Ok(assemble_filename(dir, &filename.to_string_lossy(), true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn build(options: Vec<LoggerOption>) -> Result<Config> {
        let mut config = Config::default();
        for option in options {
            option.apply(&mut config)?;
        }
        config.refresh();
        Ok(config)
    }

    #[test]
    fn test_baseline() {
        let config = Config::default();
        assert_eq!(config.level, Level::Debug);
        assert!(config.console);
        assert!(config.color);
        assert!(!config.report_caller);
        assert!(config.global_fields.is_empty());
        assert_eq!(config.resolved_out().name(), "console");
    }

    #[test]
    fn test_last_option_wins() {
        let config = build(vec![
            with_level(Level::Error),
            with_field_sort(true),
            with_level(Level::Info),
        ])
        .unwrap();
        assert_eq!(config.level, Level::Info);
        assert!(config.sort_fields);
    }

    #[test]
    fn test_custom_writer_is_not_mirrored() {
        let config = build(vec![with_custom_writer(Vec::new())]).unwrap();
        assert!(!config.console);
        assert!(!config.color);
        assert_eq!(config.resolved_out().name(), "writer");

        let mirrored =
            build(vec![with_custom_writer(Vec::new()), with_stdout_mirror(true)]).unwrap();
        assert_eq!(mirrored.resolved_out().name(), "mirror");
        assert!(!mirrored.resolved_out().is_terminal());
    }

    #[test]
    fn test_time_format_empty_layout() {
        let config = build(vec![with_time_format(true, "")]).unwrap();
        assert_eq!(config.time_format, Some(TimestampFormat::Rfc3339));

        let off = build(vec![with_time_format(true, "%Y"), with_time_format(false, "%Y")]).unwrap();
        assert_eq!(off.time_format, None);
    }

    #[test]
    fn test_file_destination_appends_suffix() {
        let dir = tempdir().unwrap();
        let config = build(vec![
            with_file_destination(dir.path().join("service"), false),
            with_stdout_mirror(false),
        ])
        .unwrap();

        assert!(dir.path().join("service.log").exists());
        assert_eq!(config.resolved_out().name(), "file");
        assert_eq!(config.rotation_tasks(), 0);
    }

    #[test]
    fn test_file_destination_with_rotation_starts_task() {
        let dir = tempdir().unwrap();
        let config = build(vec![with_file_destination(dir.path().join("app.log"), true)]).unwrap();
        assert_eq!(config.rotation_tasks(), 1);

        // Replacing the destination stops its rotation
        let mut config = config;
        with_custom_writer(Vec::new()).apply(&mut config).unwrap();
        assert_eq!(config.rotation_tasks(), 0);
    }

    #[test]
    fn test_empty_path_fails_with_option_name() {
        let err = build(vec![with_file_destination("", false)]).unwrap_err();
        match err {
            LoggerError::OptionFailed { option, source } => {
                assert_eq!(option, "with_file_destination");
                assert!(matches!(*source, LoggerError::ResolvePath { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unopenable_file_fails() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let err = build(vec![with_file_destination(blocker.join("app"), false)]).unwrap_err();
        assert!(err.to_string().contains("with_file_destination"));
    }
}
