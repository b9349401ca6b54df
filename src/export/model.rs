// src/export/model.rs

use crate::models::entry::LogEntry;
use serde::Serialize;

/// Struttura “piatta” per export delle osservazioni.
#[derive(Serialize, Clone, Debug)]
pub struct EntryExport {
    pub index: usize,
    pub key: String,
    pub timestamp: String,
    /// Timestamp in milliseconds; empty when the row does not parse
    pub millis: Option<u64>,
}

impl EntryExport {
    pub fn from_entry(index: usize, e: &LogEntry) -> Self {
        Self {
            index,
            key: e.key.clone(),
            timestamp: e.timestamp.clone(),
            millis: e.parsed_timestamp().map(|ts| ts.as_millis()),
        }
    }
}

pub(crate) fn entries_to_export(entries: &[LogEntry]) -> Vec<EntryExport> {
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| EntryExport::from_entry(i, e))
        .collect()
}
