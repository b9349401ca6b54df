use crate::utils::time::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One observation in the log: the key pressed and its absolute timestamp.
///
/// The timestamp is kept as the text found on disk, so rows that do not
/// parse are preserved across rewrites (and sort last).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogEntry {
    pub key: String,
    pub timestamp: String,
}

impl LogEntry {
    pub fn new(key: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            timestamp: timestamp.into(),
        }
    }

    pub fn parsed_timestamp(&self) -> Option<Timestamp> {
        self.timestamp.parse().ok()
    }

    /// Raw table line (`key,timestamp`), the text search matches against.
    pub fn line(&self) -> String {
        format!("{},{}", self.key, self.timestamp)
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.key, self.timestamp)
    }
}

/// Entry paired with its 0-based position in the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexedEntry {
    pub index: usize,
    pub entry: LogEntry,
}
