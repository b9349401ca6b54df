//! Table rendering utilities for CLI outputs.

use crate::models::entry::IndexedEntry;
use crate::utils::colors::{CYAN, RED, RESET, highlight, key_label};
use unicode_width::UnicodeWidthStr;

pub struct Column {
    pub header: String,
    pub width: usize,
}

/// A cell's text plus the ANSI style applied after padding ("" = none).
pub struct Cell {
    pub text: String,
    pub style: &'static str,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: "",
        }
    }

    pub fn styled(text: impl Into<String>, style: &'static str) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<(Vec<Cell>, bool)>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<Cell>, highlighted: bool) {
        // le colonne si allargano per contenere il testo più lungo
        for (col, cell) in self.columns.iter_mut().zip(&row) {
            col.width = col.width.max(UnicodeWidthStr::width(cell.text.as_str()));
        }
        self.rows.push((row, highlighted));
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        // Header
        for col in &self.columns {
            out.push_str(&pad(&col.header, col.width));
            out.push(' ');
        }
        out.push('\n');

        // Rows
        for (row, highlighted) in &self.rows {
            let mut line = String::new();
            for (col, cell) in self.columns.iter().zip(row) {
                let padded = pad(&cell.text, col.width);
                if cell.style.is_empty() || *highlighted {
                    line.push_str(&padded);
                } else {
                    line.push_str(&format!("{}{}{}", cell.style, padded, RESET));
                }
                line.push(' ');
            }

            if *highlighted {
                out.push_str(&highlight(&line));
            } else {
                out.push_str(&line);
            }
            out.push('\n');
        }

        out
    }
}

/// Left-align by display width (wide glyphs count double).
fn pad(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(w)))
}

/// Render log entries as `#  key  timestamp`, highlighting `selected`.
pub fn entries_table(entries: &[IndexedEntry], selected: Option<usize>) -> String {
    let mut table = Table::new(vec![
        Column {
            header: "#".to_string(),
            width: 3,
        },
        Column {
            header: "key".to_string(),
            width: 3,
        },
        Column {
            header: "timestamp".to_string(),
            width: 12,
        },
    ]);

    for e in entries {
        let ts_style = if e.entry.parsed_timestamp().is_some() {
            CYAN
        } else {
            RED
        };
        table.add_row(
            vec![
                Cell::plain(e.index.to_string()),
                Cell::plain(key_label(&e.entry.key)),
                Cell::styled(e.entry.timestamp.clone(), ts_style),
            ],
            selected == Some(e.index),
        );
    }

    table.render()
}
