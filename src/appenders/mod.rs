//! Appender implementations

pub mod console;
pub mod file;
pub mod mirror;
pub mod rotating_file;
pub mod writer;

pub use console::{ConsoleAppender, ConsoleStream};
pub use file::FileAppender;
pub use mirror::MirrorAppender;
pub use rotating_file::{DailyRotation, RotationTask};
pub use writer::{SharedBuffer, WriterAppender};

pub use crate::core::Appender;
