//! Undo/redo over log mutations.
//!
//! Both stacks hold copies of the affected entries, never references into the
//! table. On the undo stack `index` is where the entry was removed from; on the
//! redo stack it is where the entry was restored to.

use crate::core::store::EventLog;
use crate::errors::{AppError, AppResult};
use crate::models::entry::LogEntry;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub entry: LogEntry,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteTarget {
    Index(usize),
    Last,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub removed: LogEntry,
    /// Position the entry had before removal.
    pub index: usize,
    /// Entry to select next: wherever the entry that preceded the deleted one
    /// ended up after the re-sort, else the first one, else nothing when the
    /// log is now empty.
    pub highlight: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    undo: VecDeque<HistoryRecord>,
    redo: VecDeque<HistoryRecord>,
    /// 0 = unbounded
    #[serde(skip)]
    max_depth: usize,
}

impl History {
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }

    /// Apply a (possibly new) depth limit, dropping the oldest records.
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth;
        self.enforce_depth();
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn reset(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    /// A new forward action (append, delete, clear) invalidates redo history.
    pub fn invalidate_redo(&mut self) {
        self.redo.clear();
    }

    pub fn delete(&mut self, log: &mut EventLog, target: DeleteTarget) -> AppResult<DeleteOutcome> {
        // la riga precedente va presa prima del sort, che può spostarla
        let before = log.entries()?;
        let preceding = match target {
            DeleteTarget::Index(i) if i > 0 => before.get(i - 1).cloned(),
            DeleteTarget::Last if before.len() > 1 => before.get(before.len() - 2).cloned(),
            _ => None,
        };

        let (index, removed) = match target {
            DeleteTarget::Index(i) => (i, log.remove_at(i)?),
            DeleteTarget::Last => {
                let removed = log.remove_last()?;
                (log.len()?, removed)
            }
        };

        self.push_undo(HistoryRecord {
            entry: removed.clone(),
            index,
        });
        self.redo.clear();

        log.sort_by_timestamp()?;

        let after = log.entries()?;
        let highlight = if after.is_empty() {
            None
        } else {
            preceding
                .and_then(|p| position_of(&after, &p, None))
                .or(Some(0))
        };

        Ok(DeleteOutcome {
            removed,
            index,
            highlight,
        })
    }

    /// Restore the most recently deleted entry. Returns its position after
    /// the log has been re-sorted.
    pub fn undo(&mut self, log: &mut EventLog) -> AppResult<usize> {
        let record = self.undo.pop_back().ok_or(AppError::NothingToUndo)?;

        let inserted = match log.insert_at(record.index, record.entry.clone()) {
            Ok(pos) => pos,
            Err(e) => {
                self.undo.push_back(record);
                return Err(e);
            }
        };

        let restored = log
            .sort_by_timestamp()
            .and_then(|_| log.entries())
            .map(|entries| position_of(&entries, &record.entry, None).unwrap_or(inserted));

        self.push_redo(HistoryRecord {
            entry: record.entry,
            index: *restored.as_ref().unwrap_or(&inserted),
        });

        restored
    }

    /// Remove again the entry restored by the last undo.
    pub fn redo(&mut self, log: &mut EventLog) -> AppResult<LogEntry> {
        let record = self.redo.pop_back().ok_or(AppError::NothingToRedo)?;

        let entries = match log.entries() {
            Ok(entries) => entries,
            Err(e) => {
                self.redo.push_back(record);
                return Err(e);
            }
        };

        // entry edited away outside this session: the record is stale, drop it
        let Some(pos) = position_of(&entries, &record.entry, Some(record.index)) else {
            return Err(AppError::EntryNotFound(record.entry.to_string()));
        };

        let removed = match log.remove_at(pos) {
            Ok(removed) => removed,
            Err(e) => {
                self.redo.push_back(record);
                return Err(e);
            }
        };

        self.push_undo(HistoryRecord {
            entry: removed.clone(),
            index: pos,
        });

        log.sort_by_timestamp()?;
        Ok(removed)
    }

    fn push_undo(&mut self, record: HistoryRecord) {
        self.undo.push_back(record);
        self.enforce_depth();
    }

    fn push_redo(&mut self, record: HistoryRecord) {
        self.redo.push_back(record);
        self.enforce_depth();
    }

    fn enforce_depth(&mut self) {
        if self.max_depth == 0 {
            return;
        }
        while self.undo.len() > self.max_depth {
            self.undo.pop_front();
        }
        while self.redo.len() > self.max_depth {
            self.redo.pop_front();
        }
    }
}

/// Position of `entry`, preferring `hint` when the value there matches.
fn position_of(entries: &[LogEntry], entry: &LogEntry, hint: Option<usize>) -> Option<usize> {
    if let Some(h) = hint
        && entries.get(h) == Some(entry)
    {
        return Some(h);
    }
    entries.iter().position(|e| e == entry)
}
