//! Combined destination writing each record to several appenders

use crate::core::{Appender, Result};
use std::sync::Arc;

/// Fans every record out to all of its targets.
///
/// A combined destination is never a terminal, whatever its targets are.
pub struct MirrorAppender {
    targets: Vec<Arc<dyn Appender>>,
}

impl MirrorAppender {
    pub fn new(targets: Vec<Arc<dyn Appender>>) -> Self {
        Self { targets }
    }

    pub fn targets(&self) -> &[Arc<dyn Appender>] {
        &self.targets
    }
}

impl Appender for MirrorAppender {
    /// Writes to every target; reports the first failure after trying all
    fn append(&self, record: &[u8]) -> Result<()> {
        let mut first_err = None;
        for target in &self.targets {
            if let Err(e) = target.append(record) {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    fn flush(&self) -> Result<()> {
        let mut first_err = None;
        for target in &self.targets {
            if let Err(e) = target.flush() {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    fn name(&self) -> &str {
        "mirror"
    }
}
