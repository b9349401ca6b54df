//! A recording session: the log of one source, its undo/redo history and the
//! start offset applied to every timestamp. Passed explicitly to every
//! operation, so independent sessions can live side by side.

use crate::config::Config;
use crate::core::history::{DeleteOutcome, DeleteTarget, History};
use crate::core::journal::ttlog;
use crate::core::query;
use crate::core::store::{Appended, EventLog};
use crate::errors::{AppError, AppResult};
use crate::models::entry::{IndexedEntry, LogEntry};
use crate::utils::path::{sidecar, write_atomic};
use crate::utils::time::{elapsed_ms_from_frame, format_offset, format_timestamp, parse_start_time};
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub struct Session {
    log: EventLog,
    history: History,
    state_path: PathBuf,
    start_offset: TimeDelta,
    /// Once fixed (explicitly, or by the first record) the offset never changes.
    start_fixed: bool,
}

/// What survives between invocations besides the table itself.
#[derive(Debug, Default, Deserialize)]
struct SessionState {
    #[serde(default)]
    start_offset_ms: i64,
    #[serde(default)]
    start_fixed: bool,
    #[serde(default)]
    history: History,
}

pub fn state_path(table: &Path) -> PathBuf {
    sidecar(table, "session.json")
}

impl Session {
    /// Resume the session stored at `table` (missing table → empty log).
    ///
    /// The start offset comes from the session state only. A table without
    /// state starts at zero, already fixed when it holds entries.
    pub fn open(cfg: &Config, table: &Path) -> AppResult<Self> {
        let log = EventLog::open(table, cfg.duplicate_policy)?;
        let state_path = state_path(table);

        let state = if state_path.exists() {
            let content = fs::read_to_string(&state_path)?;
            serde_json::from_str(&content)?
        } else {
            SessionState {
                start_fixed: !log.is_empty()?,
                ..SessionState::default()
            }
        };

        let mut history = state.history;
        history.set_max_depth(cfg.history_depth);

        Ok(Self {
            log,
            history,
            state_path,
            start_offset: TimeDelta::milliseconds(state.start_offset_ms),
            start_fixed: state.start_fixed,
        })
    }

    /// Start a fresh session at `table`: header-only log, empty history.
    /// A configured `default_start_time` fixes the offset right away.
    pub fn create(cfg: &Config, table: &Path) -> AppResult<Self> {
        let configured = default_start(cfg)?;
        let log = EventLog::create(table, cfg.duplicate_policy)?;
        let session = Self {
            log,
            history: History::new(cfg.history_depth),
            state_path: state_path(table),
            start_offset: configured.unwrap_or_else(TimeDelta::zero),
            start_fixed: configured.is_some(),
        };
        session.save_state()?;

        ttlog(table, "init", &table.to_string_lossy(), "Session created")?;
        Ok(session)
    }

    /// New session for a source video: `output_dir/<stem>.csv`.
    pub fn init_for_source(cfg: &Config, source: &str) -> AppResult<Self> {
        Self::create(cfg, &cfg.table_for_source(source))
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn table(&self) -> &Path {
        self.log.path()
    }

    pub fn start_offset(&self) -> TimeDelta {
        self.start_offset
    }

    /// `false` while the offset can still be chosen.
    pub fn is_start_fixed(&self) -> bool {
        self.start_fixed
    }

    /// Set the offset, once per session and only before anything is logged.
    pub fn set_start_offset(&mut self, offset: TimeDelta) -> AppResult<()> {
        if self.start_fixed || !self.log.is_empty()? {
            return Err(AppError::Other(format!(
                "Start time already set for this session ({})",
                format_offset(self.start_offset)
            )));
        }
        self.start_offset = offset;
        self.start_fixed = true;
        self.save_state()?;
        ttlog(self.table(), "start", "", &format_offset(offset))
    }

    /// Log `key` at `elapsed_ms` of playback. `None` when the duplicate
    /// policy rejected it.
    pub fn record(&mut self, key: &str, elapsed_ms: f64) -> AppResult<Option<LogEntry>> {
        let timestamp = format_timestamp(elapsed_ms, self.start_offset());

        match self.log.append(key, &timestamp)? {
            Appended::Added(_) => {
                // le righe già scritte usano questo offset: non si cambia più
                self.start_fixed = true;
                self.history.invalidate_redo();
                self.save_state()?;
                ttlog(self.table(), "log", key, &timestamp)?;
                Ok(Some(LogEntry::new(key, timestamp)))
            }
            Appended::Skipped => Ok(None),
        }
    }

    pub fn record_at_frame(
        &mut self,
        key: &str,
        frame_idx: u64,
        fps: f64,
    ) -> AppResult<Option<LogEntry>> {
        self.record(key, elapsed_ms_from_frame(frame_idx, fps))
    }

    pub fn delete(&mut self, target: DeleteTarget) -> AppResult<DeleteOutcome> {
        let outcome = self.history.delete(&mut self.log, target);
        // lo stato della history va salvato anche se il sort è fallito
        self.save_state()?;
        let outcome = outcome?;

        ttlog(
            self.table(),
            "del",
            &outcome.removed.key,
            &format!("{} (index {})", outcome.removed.timestamp, outcome.index),
        )?;
        Ok(outcome)
    }

    pub fn undo(&mut self) -> AppResult<usize> {
        let restored = self.history.undo(&mut self.log);
        self.save_state()?;
        let restored = restored?;

        ttlog(self.table(), "undo", "", &format!("restored at index {restored}"))?;
        Ok(restored)
    }

    pub fn redo(&mut self) -> AppResult<LogEntry> {
        let removed = self.history.redo(&mut self.log);
        self.save_state()?;
        let removed = removed?;

        ttlog(self.table(), "redo", &removed.key, &removed.timestamp)?;
        Ok(removed)
    }

    pub fn clear(&mut self) -> AppResult<()> {
        self.log.clear()?;
        self.history.reset();
        self.save_state()?;
        ttlog(self.table(), "clear", "", "Log reset to header")
    }

    pub fn sort(&self) -> AppResult<()> {
        self.log.sort_by_timestamp()?;
        ttlog(self.table(), "sort", "", "Sorted by timestamp")
    }

    pub fn entries(&self) -> AppResult<Vec<LogEntry>> {
        self.log.entries()
    }

    pub fn tail(&self, n: usize) -> AppResult<Vec<IndexedEntry>> {
        query::tail(&self.log, n)
    }

    pub fn search(&self, needle: &str) -> AppResult<Vec<IndexedEntry>> {
        query::search(&self.log, needle)
    }

    pub fn save_state(&self) -> AppResult<()> {
        let state = SessionStateRef {
            start_offset_ms: self.start_offset.num_milliseconds(),
            start_fixed: self.start_fixed,
            history: &self.history,
        };
        let json = serde_json::to_vec_pretty(&state)?;
        write_atomic(&self.state_path, &json)?;
        Ok(())
    }
}

#[derive(Serialize)]
struct SessionStateRef<'a> {
    start_offset_ms: i64,
    start_fixed: bool,
    history: &'a History,
}

fn default_start(cfg: &Config) -> AppResult<Option<TimeDelta>> {
    cfg.default_start_time
        .as_deref()
        .map(parse_start_time)
        .transpose()
}
