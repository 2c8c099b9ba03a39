//! Call-site resolution
//!
//! The stack is walked from the resolver outwards. Frames are skipped until
//! the walk enters this crate, then while it stays inside it; the first frame
//! after that is the call site.

use std::fmt;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Placeholder used when the call site cannot be determined
pub const FAILED: &str = "failed";

/// Upper bound on frames inspected per resolution
const MAXIMUM_CALLER_DEPTH: usize = 48;

/// Substring of the resolver's own symbol, used to learn the crate prefix
const MARKER: &str = "caller::facility_prefix";

/// A resolved stack frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerFrame {
    pub file: Option<PathBuf>,
    pub line: Option<u32>,
    pub function: String,
}

/// Call-site information rendered under `_filepath` and `_func`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub file: String,
    pub line: u32,
    pub function: String,
}

impl CallSite {
    pub fn new(file: impl Into<String>, line: u32, function: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line,
            function: function.into(),
        }
    }

    pub fn failed() -> Self {
        Self::new(FAILED, 0, FAILED)
    }

    /// `file:line`
    pub fn file_line(&self) -> String {
        format!("{}:{}", self.file, self.line)
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {}", self.file, self.line, self.function)
    }
}

/// Crate root of a qualified symbol name: `<fieldlog::a::B as T>::f` -> `fieldlog`
fn crate_root(name: &str) -> &str {
    let name = name.trim_start_matches('<');
    name.split("::").next().unwrap_or(name)
}

fn belongs_to(name: &str, prefix: &str) -> bool {
    name.trim_start_matches('<')
        .strip_prefix(prefix)
        .is_some_and(|rest| rest.starts_with("::"))
}

/// The crate's own symbol prefix, learned once from the live stack
fn facility_prefix() -> &'static str {
    static PREFIX: OnceLock<String> = OnceLock::new();

    PREFIX.get_or_init(|| {
        let mut prefix = None;
        let mut depth = 0;

        backtrace::trace(|frame| {
            depth += 1;
            backtrace::resolve_frame(frame, |symbol| {
                if prefix.is_some() {
                    return;
                }
                if let Some(name) = symbol.name() {
                    let name = format!("{:#}", name);
                    if name.contains(MARKER) {
                        prefix = Some(crate_root(&name).to_string());
                    }
                }
            });
            prefix.is_none() && depth < MAXIMUM_CALLER_DEPTH
        });

        prefix.unwrap_or_else(|| crate_root(module_path!()).to_string())
    })
}

/// First frame outside this crate, or `None` when the walk never leaves it
pub fn resolve() -> Option<CallerFrame> {
    let prefix = facility_prefix();
    let mut inside = false;
    let mut found = None;
    let mut depth = 0;

    backtrace::trace(|frame| {
        depth += 1;
        backtrace::resolve_frame(frame, |symbol| {
            if found.is_some() {
                return;
            }
            let Some(name) = symbol.name() else {
                return;
            };
            let name = format!("{:#}", name);

            if belongs_to(&name, prefix) {
                inside = true;
            } else if inside {
                found = Some(CallerFrame {
                    file: symbol.filename().map(Path::to_path_buf),
                    line: symbol.lineno(),
                    function: name,
                });
            }
        });
        found.is_none() && depth < MAXIMUM_CALLER_DEPTH
    });

    found
}

/// Keep only the last two components: `/home/u/app/src/main.rs` -> `src/main.rs`
pub fn shorten(path: &Path) -> String {
    let mut parts: Vec<_> = path
        .components()
        .rev()
        .take(2)
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    parts.reverse();
    parts.join("/")
}

/// Resolve the call site of the current log call.
///
/// Symbol data missing from the binary falls back to the tracked caller
/// location for file and line, and to [`FAILED`] for the function name.
#[track_caller]
pub fn call_site() -> CallSite {
    let location = Location::caller();

    match resolve() {
        Some(frame) => CallSite {
            file: frame
                .file
                .as_deref()
                .map(shorten)
                .unwrap_or_else(|| location.file().to_string()),
            line: frame.line.unwrap_or_else(|| location.line()),
            function: frame.function,
        },
        None => CallSite::new(location.file(), location.line(), FAILED),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_root() {
        assert_eq!(crate_root("fieldlog::core::caller::resolve"), "fieldlog");
        assert_eq!(
            crate_root("<fieldlog::core::entry::Entry as core::fmt::Debug>::fmt"),
            "fieldlog"
        );
        assert_eq!(crate_root("main"), "main");
    }

    #[test]
    fn test_belongs_to() {
        assert!(belongs_to("fieldlog::core::entry::Entry::info", "fieldlog"));
        assert!(belongs_to("<fieldlog::Logger as core::clone::Clone>::clone", "fieldlog"));
        assert!(!belongs_to("fieldlogger::run", "fieldlog"));
        assert!(!belongs_to("app::main", "fieldlog"));
    }

    #[test]
    fn test_prefix_is_this_crate() {
        assert_eq!(facility_prefix(), "fieldlog");
    }

    #[test]
    fn test_shorten() {
        assert_eq!(shorten(Path::new("/home/u/app/src/main.rs")), "src/main.rs");
        assert_eq!(shorten(Path::new("main.rs")), "main.rs");
    }

    #[test]
    fn test_failed_placeholder() {
        let site = CallSite::failed();
        assert_eq!(site.file_line(), "failed:0");
        assert_eq!(site.function, FAILED);
    }

    #[test]
    fn test_call_site_never_panics() {
        // Unit tests run inside this crate, so only the shape is checked here
        let site = call_site();
        assert!(!site.file.is_empty());
        assert!(!site.function.is_empty());
    }
}
