// src/export/logic.rs

use crate::core::journal::ttlog;
use crate::core::store::{EventLog, sort_entries};
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::entries_to_export;
use crate::ui::messages::warning;
use std::path::Path;

/// Logica di alto livello per l'export.
pub struct ExportLogic;

impl ExportLogic {
    /// Write a copy of the log to `file`.
    ///
    /// - `format`: csv | json
    /// - `sorted`: export in timestamp order without touching the table
    /// - `force`: overwrite an existing file without asking
    pub fn export(
        log: &EventLog,
        format: ExportFormat,
        file: &Path,
        sorted: bool,
        force: bool,
    ) -> AppResult<()> {
        ensure_writable(file, force)?;

        let mut entries = log.entries()?;
        if entries.is_empty() {
            warning("No entries to export.");
        }
        if sorted {
            sort_entries(&mut entries);
        }

        let rows = entries_to_export(&entries);
        match format {
            ExportFormat::Csv => export_csv(&rows, file)?,
            ExportFormat::Json => export_json(&rows, file)?,
        }

        ttlog(
            log.path(),
            "export",
            &file.to_string_lossy(),
            &format!("{} entries as {}", rows.len(), format.as_str()),
        )
    }
}
