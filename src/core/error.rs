//! Error types for the logger

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// A logger option could not be applied; the logger is not constructed
    #[error("failed to apply option {option}: {source}")]
    OptionFailed {
        option: &'static str,
        #[source]
        source: Box<LoggerError>,
    },

    /// The destination path could not be resolved to an absolute path
    #[error("cannot resolve absolute path for '{path}'")]
    ResolvePath {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The destination file (or its directory) could not be created or opened
    #[error("cannot open log file '{path}'")]
    OpenFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// File rotation error
    #[error("File rotation failed for '{path}': {message}")]
    FileRotation { path: String, message: String },

    /// Formatter error
    #[error("Formatter error: {message}")]
    Formatter { message: String },

    /// Unrecognized level name
    #[error("Invalid log level: '{0}'")]
    InvalidLevel(String),

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON (settings) error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl LoggerError {
    /// Wrap an option failure with the option's name
    pub fn option(option: &'static str, source: LoggerError) -> Self {
        LoggerError::OptionFailed {
            option,
            source: Box::new(source),
        }
    }

    pub fn resolve_path(path: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::ResolvePath {
            path: path.into(),
            source,
        }
    }

    pub fn open_file(path: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::OpenFile {
            path: path.into(),
            source,
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a file rotation error
    pub fn file_rotation(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileRotation {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a formatter error
    pub fn formatter(message: impl Into<String>) -> Self {
        LoggerError::Formatter {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display() {
        let err = LoggerError::file_rotation("/var/log/app.log", "Disk full");
        assert_eq!(
            err.to_string(),
            "File rotation failed for '/var/log/app.log': Disk full"
        );

        let err = LoggerError::InvalidLevel("loud".to_string());
        assert_eq!(err.to_string(), "Invalid log level: 'loud'");
    }

    #[test]
    fn test_option_error_keeps_cause() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::option(
            "with_file_destination",
            LoggerError::open_file("/root/app.log", io_err),
        );

        assert!(matches!(err, LoggerError::OptionFailed { .. }));
        assert!(err.to_string().contains("with_file_destination"));
        assert!(err.to_string().contains("/root/app.log"));

        let cause = err.source().expect("wrapped cause");
        assert!(cause.to_string().contains("cannot open log file"));
        assert!(cause.source().is_some());
    }
}
