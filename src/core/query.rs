//! Read-side views over the log: recent entries and substring search.

use crate::core::store::EventLog;
use crate::errors::AppResult;
use crate::models::entry::IndexedEntry;

/// Last `n` entries in on-disk order, with their positions.
pub fn tail(log: &EventLog, n: usize) -> AppResult<Vec<IndexedEntry>> {
    let entries = log.entries()?;
    let start = entries.len().saturating_sub(n);

    Ok(entries
        .into_iter()
        .enumerate()
        .skip(start)
        .map(|(index, entry)| IndexedEntry { index, entry })
        .collect())
}

/// Case-sensitive substring match against the raw `key,timestamp` line.
/// No match is an empty result, not an error.
pub fn search(log: &EventLog, needle: &str) -> AppResult<Vec<IndexedEntry>> {
    Ok(log
        .entries()?
        .into_iter()
        .enumerate()
        .filter(|(_, entry)| entry.line().contains(needle))
        .map(|(index, entry)| IndexedEntry { index, entry })
        .collect())
}
