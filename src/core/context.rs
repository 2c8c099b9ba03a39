//! Request-scoped contexts and the strategies that turn them into a field

use super::fields::FieldValue;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Field name used when a parser does not name its own
pub const DEFAULT_CONTEXT_FIELD: &str = "_context";

/// Value recorded by [`NoopContextParser`]
pub const NOOP_CONTEXT_VALUE: &str = "non action";

/// Opaque request-scoped value attached to an entry with `with_context`
pub type Context = Arc<dyn Any + Send + Sync>;

/// Converts an attached context into one named field.
///
/// Only invoked when an entry actually carries a context.
pub trait ContextParser: Send + Sync {
    fn parse(&self, ctx: &(dyn Any + Send + Sync)) -> FieldValue;

    fn field_name(&self) -> &str;
}

type ParseFn = dyn Fn(&(dyn Any + Send + Sync)) -> FieldValue + Send + Sync;

/// Closure-backed [`ContextParser`]
///
/// # Example
///
/// ```
/// use fieldlog::{ContextParser, FieldValue, FnContextParser};
///
/// struct RequestId(u64);
///
/// let parser = FnContextParser::new(
///     |ctx| match ctx.downcast_ref::<RequestId>() {
///         Some(id) => FieldValue::from(id.0),
///         None => FieldValue::Null,
///     },
///     "request_id",
/// );
/// assert_eq!(parser.field_name(), "request_id");
/// ```
pub struct FnContextParser {
    parse: Box<ParseFn>,
    field_name: String,
}

impl FnContextParser {
    /// An empty `field_name` falls back to [`DEFAULT_CONTEXT_FIELD`]
    pub fn new<F>(parse: F, field_name: impl Into<String>) -> Self
    where
        F: Fn(&(dyn Any + Send + Sync)) -> FieldValue + Send + Sync + 'static,
    {
        let mut field_name = field_name.into();
        if field_name.is_empty() {
            field_name = DEFAULT_CONTEXT_FIELD.to_string();
        }

        Self {
            parse: Box::new(parse),
            field_name,
        }
    }

    pub fn with_default_name<F>(parse: F) -> Self
    where
        F: Fn(&(dyn Any + Send + Sync)) -> FieldValue + Send + Sync + 'static,
    {
        Self::new(parse, DEFAULT_CONTEXT_FIELD)
    }
}

impl ContextParser for FnContextParser {
    fn parse(&self, ctx: &(dyn Any + Send + Sync)) -> FieldValue {
        (self.parse)(ctx)
    }

    fn field_name(&self) -> &str {
        &self.field_name
    }
}

impl fmt::Debug for FnContextParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnContextParser")
            .field("field_name", &self.field_name)
            .finish_non_exhaustive()
    }
}

/// Default parser: records a placeholder under `_context`
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopContextParser;

impl ContextParser for NoopContextParser {
    fn parse(&self, _ctx: &(dyn Any + Send + Sync)) -> FieldValue {
        FieldValue::from(NOOP_CONTEXT_VALUE)
    }

    fn field_name(&self) -> &str {
        DEFAULT_CONTEXT_FIELD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TraceId(&'static str);

    #[test]
    fn test_fn_parser_downcasts() {
        let parser = FnContextParser::new(
            |ctx| {
                ctx.downcast_ref::<TraceId>()
                    .map_or(FieldValue::Null, |t| FieldValue::from(t.0))
            },
            "trace_id",
        );

        let ctx: Context = Arc::new(TraceId("abc123"));
        assert_eq!(parser.parse(&*ctx), FieldValue::from("abc123"));
        assert_eq!(parser.parse(&42u8), FieldValue::Null);
        assert_eq!(parser.field_name(), "trace_id");
    }

    #[test]
    fn test_empty_name_uses_default() {
        let parser = FnContextParser::new(|_| FieldValue::Null, "");
        assert_eq!(parser.field_name(), DEFAULT_CONTEXT_FIELD);

        let parser = FnContextParser::with_default_name(|_| FieldValue::Null);
        assert_eq!(parser.field_name(), DEFAULT_CONTEXT_FIELD);
    }

    #[test]
    fn test_noop_parser() {
        let parser = NoopContextParser;
        assert_eq!(parser.parse(&()), FieldValue::from(NOOP_CONTEXT_VALUE));
        assert_eq!(parser.field_name(), "_context");
    }
}
