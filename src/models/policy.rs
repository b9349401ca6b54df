use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How `append` treats entries that were already logged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Always append, even identical (key, timestamp) pairs.
    #[default]
    Allow,
    /// A key is logged at most once per session (until the log is cleared).
    UniqueKey,
    /// An identical (key, timestamp) pair is not appended twice.
    UniqueEntry,
}

impl DuplicatePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DuplicatePolicy::Allow => "allow",
            DuplicatePolicy::UniqueKey => "unique-key",
            DuplicatePolicy::UniqueEntry => "unique-entry",
        }
    }
}
