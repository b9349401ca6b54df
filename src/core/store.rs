//! Persistent event log: a two-column CSV table (`key,timestamp`).
//!
//! Every mutation reads the whole table, changes it in memory and writes it
//! back through [`write_atomic`], so a reader never sees a half-written file
//! and a failed write leaves the previous table untouched.

use crate::errors::{AppError, AppResult};
use crate::models::entry::LogEntry;
use crate::models::policy::DuplicatePolicy;
use crate::utils::path::write_atomic;
use crate::utils::time::Timestamp;
use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use std::path::{Path, PathBuf};

pub const HEADER: [&str; 2] = ["key", "timestamp"];

/// Result of an append request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appended {
    /// Entry written at this 0-based position.
    Added(usize),
    /// Rejected by the duplicate policy; the table is unchanged.
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    KeyFirst,
    TimestampFirst,
    /// No header: decide row by row.
    Guess,
}

/// Duplicate checks look at the table as it is on disk, so a deleted key can
/// be logged again and every process sharing the table applies the same rule.
pub struct EventLog {
    path: PathBuf,
    policy: DuplicatePolicy,
}

impl EventLog {
    /// Start a new table (header only), replacing whatever was there.
    pub fn create(path: impl Into<PathBuf>, policy: DuplicatePolicy) -> AppResult<Self> {
        let log = Self {
            path: path.into(),
            policy,
        };
        write_table(&log.path, &[])?;
        Ok(log)
    }

    /// Attach to an existing table. A missing file is an empty log; an
    /// unreadable one is reported here rather than at the first mutation.
    pub fn open(path: impl Into<PathBuf>, policy: DuplicatePolicy) -> AppResult<Self> {
        let path = path.into();
        read_table(&path)?;
        Ok(Self { path, policy })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    pub fn entries(&self) -> AppResult<Vec<LogEntry>> {
        read_table(&self.path)
    }

    pub fn len(&self) -> AppResult<usize> {
        Ok(self.entries()?.len())
    }

    pub fn is_empty(&self) -> AppResult<bool> {
        Ok(self.len()? == 0)
    }

    pub fn append(&mut self, key: &str, timestamp: &str) -> AppResult<Appended> {
        let mut entries = self.entries()?;
        let entry = LogEntry::new(key, timestamp);

        let duplicate = match self.policy {
            DuplicatePolicy::Allow => false,
            DuplicatePolicy::UniqueKey => entries.iter().any(|e| e.key == key),
            DuplicatePolicy::UniqueEntry => entries.contains(&entry),
        };
        if duplicate {
            return Ok(Appended::Skipped);
        }

        entries.push(entry);
        write_table(&self.path, &entries)?;

        Ok(Appended::Added(entries.len() - 1))
    }

    /// Reset to the header row.
    pub fn clear(&mut self) -> AppResult<()> {
        write_table(&self.path, &[])
    }

    /// Stable ascending sort by parsed timestamp; unparsable rows go last.
    pub fn sort_by_timestamp(&self) -> AppResult<()> {
        let mut entries = self.entries()?;
        sort_entries(&mut entries);
        write_table(&self.path, &entries)
    }

    /// Last `n` entries in on-disk order.
    pub fn last_entries(&self, n: usize) -> AppResult<Vec<LogEntry>> {
        let entries = self.entries()?;
        let start = entries.len().saturating_sub(n);
        Ok(entries[start..].to_vec())
    }

    pub fn remove_at(&mut self, index: usize) -> AppResult<LogEntry> {
        let mut entries = self.entries()?;
        if index >= entries.len() {
            return Err(AppError::IndexOutOfRange {
                index,
                len: entries.len(),
            });
        }

        let removed = entries.remove(index);
        write_table(&self.path, &entries)?;
        Ok(removed)
    }

    pub fn remove_last(&mut self) -> AppResult<LogEntry> {
        let mut entries = self.entries()?;
        let removed = entries.pop().ok_or(AppError::NothingToUndo)?;
        write_table(&self.path, &entries)?;
        Ok(removed)
    }

    /// Insert at `index`, clamped to `[0, len]`. Returns the actual position.
    pub fn insert_at(&mut self, index: usize, entry: LogEntry) -> AppResult<usize> {
        let mut entries = self.entries()?;
        let pos = index.min(entries.len());
        entries.insert(pos, entry);
        write_table(&self.path, &entries)?;
        Ok(pos)
    }
}

pub fn sort_entries(entries: &mut [LogEntry]) {
    // None (parse failure) must sort after every real timestamp
    entries.sort_by_key(|e| match e.parsed_timestamp() {
        Some(ts) => (false, ts),
        None => (true, Timestamp::from_millis(0)),
    });
}

/// Read a table written in either column order. Missing file → empty.
pub fn read_table(path: &Path) -> AppResult<Vec<LogEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut layout = None;
    let mut entries = Vec::new();

    for record in rdr.records() {
        let record = record?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }

        let current = match layout {
            Some(l) => l,
            None => {
                let detected = detect_header(&record);
                layout = Some(detected.unwrap_or(Layout::Guess));
                if detected.is_some() {
                    continue;
                }
                Layout::Guess
            }
        };

        entries.push(entry_from_record(&record, current));
    }

    Ok(entries)
}

fn detect_header(record: &StringRecord) -> Option<Layout> {
    let fields: Vec<String> = record.iter().map(|f| f.trim().to_lowercase()).collect();
    match fields.as_slice() {
        [k, t] if k == "key" && t == "timestamp" => Some(Layout::KeyFirst),
        [t, k] if t == "timestamp" && k == "key" => Some(Layout::TimestampFirst),
        _ => None,
    }
}

fn entry_from_record(record: &StringRecord, layout: Layout) -> LogEntry {
    let fields: Vec<&str> = record.iter().collect();
    if fields.len() < 2 {
        return LogEntry::new(fields.first().copied().unwrap_or_default(), "");
    }

    let layout = match layout {
        Layout::Guess => {
            let first_is_ts = fields[0].parse::<Timestamp>().is_ok();
            let last_is_ts = fields[fields.len() - 1].parse::<Timestamp>().is_ok();
            if first_is_ts && !last_is_ts {
                Layout::TimestampFirst
            } else {
                Layout::KeyFirst
            }
        }
        other => other,
    };

    // Un tasto "," scritto senza quoting produce campi in più: li ricomponiamo
    match layout {
        Layout::TimestampFirst => {
            LogEntry::new(fields[1..].join(",").trim_start(), fields[0].trim())
        }
        _ => {
            let last = fields.len() - 1;
            LogEntry::new(fields[..last].join(","), fields[last].trim())
        }
    }
}

/// Serialize the canonical table and swap it in atomically.
pub fn write_table(path: &Path, entries: &[LogEntry]) -> AppResult<()> {
    let mut wtr = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    wtr.write_record(HEADER)?;
    for e in entries {
        wtr.write_record([e.key.as_str(), e.timestamp.as_str()])?;
    }

    let bytes = wtr.into_inner().map_err(|e| AppError::Io(e.into_error()))?;
    write_atomic(path, &bytes)?;
    Ok(())
}
