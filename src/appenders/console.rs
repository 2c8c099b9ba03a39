//! Console appender implementation

use crate::core::{Appender, Result};
use std::io::{self, IsTerminal, Write};

/// Which standard stream a [`ConsoleAppender`] writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleStream {
    #[default]
    Stdout,
    Stderr,
}

/// Writes records to the process's standard output or error stream
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleAppender {
    stream: ConsoleStream,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self::stdout()
    }

    pub fn stdout() -> Self {
        Self {
            stream: ConsoleStream::Stdout,
        }
    }

    pub fn stderr() -> Self {
        Self {
            stream: ConsoleStream::Stderr,
        }
    }

    pub fn stream(&self) -> ConsoleStream {
        self.stream
    }
}

impl Appender for ConsoleAppender {
    fn append(&self, record: &[u8]) -> Result<()> {
        // Holding the stream lock keeps one record in one piece
        match self.stream {
            ConsoleStream::Stdout => io::stdout().lock().write_all(record)?,
            ConsoleStream::Stderr => io::stderr().lock().write_all(record)?,
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        match self.stream {
            ConsoleStream::Stdout => io::stdout().flush()?,
            ConsoleStream::Stderr => io::stderr().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }

    fn is_terminal(&self) -> bool {
        match self.stream {
            ConsoleStream::Stdout => io::stdout().is_terminal(),
            ConsoleStream::Stderr => io::stderr().is_terminal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_selection() {
        assert_eq!(ConsoleAppender::new().stream(), ConsoleStream::Stdout);
        assert_eq!(ConsoleAppender::stderr().stream(), ConsoleStream::Stderr);
        assert_eq!(ConsoleAppender::stderr().name(), "console");
    }

    #[test]
    fn test_stderr_write() {
        ConsoleAppender::stderr().append(b"console appender test\n").unwrap();
        ConsoleAppender::stderr().flush().unwrap();
    }
}
