//! Per-call entries: field chaining and the single emission path

use super::appender::Appender;
use super::caller;
use super::config::Config;
use super::context::{Context, ContextParser, NoopContextParser};
use super::fields::{FieldValue, Fields};
use super::formatter::{FixedFields, Formatter, Record};
use super::log_level::Level;
use super::logger::LoggerShared;
use chrono::Local;
use std::borrow::Cow;
use std::fmt;
use std::process;
use std::sync::Arc;

/// A record under construction.
///
/// Chaining calls never touch the receiver; each returns a new entry with the
/// merged fields. Destination, formatter, threshold and caller flag are taken
/// from the logger's configuration when the root entry is issued, so changing
/// the logger afterwards does not affect entries already handed out.
///
/// An entry not issued by a [`Logger`](crate::Logger) has no destination and
/// discards everything.
#[derive(Clone, Default)]
pub struct Entry {
    logger: Option<Arc<LoggerShared>>,
    out: Option<Arc<dyn Appender>>,
    formatter: Option<Arc<dyn Formatter>>,
    level: Level,
    report_caller: bool,
    fields: Fields,
    context: Option<Context>,
    context_parser: Option<Arc<dyn ContextParser>>,
}

impl Entry {
    /// Bind a pooled or fresh entry to the current configuration
    pub(crate) fn populate(&mut self, logger: &Arc<LoggerShared>, config: &Config) {
        self.logger = Some(Arc::clone(logger));
        self.out = Some(Arc::clone(config.resolved_out()));
        self.formatter = Some(Arc::clone(config.formatter()));
        self.level = config.level;
        self.report_caller = config.report_caller;
        self.fields.clear();
        self.fields.merge(&config.global_fields);
        self.context = None;
        self.context_parser = Some(Arc::clone(&config.context_parser));
    }

    /// Drop every reference and field; the field map keeps its allocation
    pub(crate) fn reset(&mut self) {
        self.logger = None;
        self.out = None;
        self.formatter = None;
        self.level = Level::default();
        self.report_caller = false;
        self.fields.clear();
        self.context = None;
        self.context_parser = None;
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Threshold captured from the configuration
    pub fn level(&self) -> Level {
        self.level
    }

    pub fn has_context(&self) -> bool {
        self.context.is_some()
    }

    #[must_use]
    pub fn with_field(&self, key: impl Into<String>, value: impl Into<FieldValue>) -> Entry {
        let mut next = self.clone();
        next.fields.insert(key, value);
        next
    }

    /// New entry carrying this entry's fields overlaid with `fields`
    #[must_use]
    pub fn with_fields(&self, fields: Fields) -> Entry {
        Entry {
            fields: self.fields.merged(&fields),
            ..self.clone_without_fields()
        }
    }

    /// New entry with `ctx` attached, replacing any previous context
    #[must_use]
    pub fn with_context(&self, ctx: Context) -> Entry {
        let mut next = self.clone();
        next.context = Some(ctx);
        next
    }

    fn clone_without_fields(&self) -> Entry {
        Entry {
            logger: self.logger.clone(),
            out: self.out.clone(),
            formatter: self.formatter.clone(),
            level: self.level,
            report_caller: self.report_caller,
            fields: Fields::new(),
            context: self.context.clone(),
            context_parser: self.context_parser.clone(),
        }
    }

    /// Emit at fatal level, flush, and exit the process with status 1
    #[track_caller]
    pub fn fatal(&self, msg: impl fmt::Display) -> ! {
        self.output(Level::Fatal, format_args!("{}", msg));
        self.exit()
    }

    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.output(Level::Fatal, args);
        self.exit()
    }

    #[track_caller]
    pub fn error(&self, msg: impl fmt::Display) {
        self.output(Level::Error, format_args!("{}", msg));
    }

    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.output(Level::Error, args);
    }

    #[track_caller]
    pub fn warn(&self, msg: impl fmt::Display) {
        self.output(Level::Warning, format_args!("{}", msg));
    }

    #[track_caller]
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.output(Level::Warning, args);
    }

    #[track_caller]
    pub fn info(&self, msg: impl fmt::Display) {
        self.output(Level::Info, format_args!("{}", msg));
    }

    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.output(Level::Info, args);
    }

    #[track_caller]
    pub fn debug(&self, msg: impl fmt::Display) {
        self.output(Level::Debug, format_args!("{}", msg));
    }

    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.output(Level::Debug, args);
    }

    /// Emit at `level`; a fatal level still exits the process
    #[track_caller]
    pub fn log(&self, level: Level, msg: impl fmt::Display) {
        self.logf(level, format_args!("{}", msg));
    }

    #[track_caller]
    pub fn logf(&self, level: Level, args: fmt::Arguments<'_>) {
        self.output(level, args);
        if level == Level::Fatal {
            self.exit();
        }
    }

    /// The single emission path. Failures past the gate are reported on
    /// stderr and counted, never returned.
    #[track_caller]
    fn output(&self, level: Level, args: fmt::Arguments<'_>) {
        if !self.level.allows(level) {
            return;
        }
        let (Some(out), Some(formatter)) = (&self.out, &self.formatter) else {
            return;
        };

        let timestamp = Local::now();
        let caller = if self.report_caller {
            Some(caller::call_site())
        } else {
            None
        };
        let fixed = FixedFields { timestamp, caller };

        let fields = match &self.context {
            Some(ctx) => {
                let noop = NoopContextParser;
                let parser: &dyn ContextParser = self.context_parser.as_deref().unwrap_or(&noop);
                let mut fields = self.fields.clone();
                fields.insert(parser.field_name(), parser.parse(&**ctx));
                Cow::Owned(fields)
            }
            None => Cow::Borrowed(&self.fields),
        };

        let mut message = String::new();
        if fmt::write(&mut message, args).is_err() {
            eprintln!("[LOGGER WARN] could not format message: message arguments failed to render");
            self.with_metrics(|m| m.record_format_failure());
            return;
        }

        let record = Record {
            level,
            fixed: &fixed,
            fields: &fields,
            message: &message,
        };

        let data = match formatter.format(&record) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("[LOGGER WARN] could not format message: {}", e);
                self.with_metrics(|m| m.record_format_failure());
                return;
            }
        };

        if let Err(e) = out.append(&data) {
            eprintln!("[LOGGER WARN] could not write log data: {}", e);
            self.with_metrics(|m| m.record_write_failure());
        } else {
            self.with_metrics(|m| m.record_logged());
        }
    }

    fn with_metrics(&self, record: impl FnOnce(&super::metrics::LoggerMetrics) -> u64) {
        if let Some(logger) = &self.logger {
            record(&logger.metrics);
        }
    }

    fn exit(&self) -> ! {
        if let Some(out) = &self.out {
            if let Err(e) = out.flush() {
                eprintln!("[LOGGER ERROR] flush before exit failed: {}", e);
            }
        }
        process::exit(1)
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("level", &self.level)
            .field("report_caller", &self.report_caller)
            .field("fields", &self.fields)
            .field("has_context", &self.context.is_some())
            .field("destination", &self.out.as_ref().map(|o| o.name().to_string()))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_fields_is_non_destructive() {
        let base = Entry::default().with_field("a", 1);
        let next = base.with_fields(Fields::new().with("b", 2));

        assert_eq!(base.fields().len(), 1);
        assert_eq!(next.fields().len(), 2);
        assert_eq!(next.fields().get("a"), Some(&FieldValue::Int(1)));
        assert_eq!(next.fields().get("b"), Some(&FieldValue::Int(2)));
    }

    #[test]
    fn test_with_fields_later_wins() {
        let base = Entry::default().with_fields(Fields::new().with("a", 1).with("c", 3));
        let next = base.with_fields(Fields::new().with("a", 2));

        assert_eq!(next.fields().get("a"), Some(&FieldValue::Int(2)));
        assert_eq!(next.fields().get("c"), Some(&FieldValue::Int(3)));
        assert_eq!(base.fields().get("a"), Some(&FieldValue::Int(1)));
    }

    #[test]
    fn test_with_context_replaces() {
        let base = Entry::default();
        let first = base.with_context(Arc::new(1u32));
        let second = first.with_context(Arc::new("two"));

        assert!(!base.has_context());
        assert!(first.has_context());
        let ctx = second.context.as_ref().unwrap();
        assert_eq!(ctx.downcast_ref::<&str>(), Some(&"two"));
    }

    #[test]
    fn test_unbound_entry_discards() {
        // No destination: emission is a no-op rather than a panic
        Entry::default().info("nowhere");
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut entry = Entry::default()
            .with_field("leak", "me")
            .with_context(Arc::new(7u8));
        entry.reset();

        assert!(entry.fields().is_empty());
        assert!(!entry.has_context());
        assert!(entry.logger.is_none());
    }
}
