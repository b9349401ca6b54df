//! Internal operations journal: one line per mutating operation, kept next
//! to the table as `<table>.journal`.

use crate::errors::AppResult;
use crate::utils::path::sidecar;
use ansi_term::Colour;
use chrono::Local;
use csv::{ReaderBuilder, Terminator, WriterBuilder};
use regex::Regex;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static ANSI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("valid ANSI regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalLine {
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

pub fn journal_path(table: &Path) -> PathBuf {
    sidecar(table, "journal")
}

/// Append one line to the journal of `table`.
pub fn ttlog(table: &Path, operation: &str, target: &str, message: &str) -> AppResult<()> {
    // Timestamp locale, formattato in ISO 8601
    let now = Local::now().to_rfc3339();

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(journal_path(table))?;

    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(file);

    wtr.write_record([now.as_str(), operation, target, message])?;
    wtr.flush()?;

    Ok(())
}

pub fn read_journal(table: &Path) -> AppResult<Vec<JournalLine>> {
    let path = journal_path(table);
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut lines = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let field = |i: usize| record.get(i).unwrap_or_default().to_string();
        lines.push(JournalLine {
            date: field(0),
            operation: field(1),
            target: field(2),
            message: field(3),
        });
    }

    Ok(lines)
}

fn strip_ansi(s: &str) -> String {
    ANSI_RE.replace_all(s, "").into_owned()
}

/// Restituisce il colore ANSI in base all'operazione
fn color_for_operation(op: &str) -> Colour {
    match op {
        "log" => Colour::Green,
        "del" => Colour::Red,
        "undo" | "redo" => Colour::Yellow,
        "sort" => Colour::Cyan,
        "clear" => Colour::Purple,
        "backup" | "export" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51), // arancione
        _ => Colour::White,
    }
}

pub struct JournalLogic;

impl JournalLogic {
    pub fn print_journal(table: &Path) -> AppResult<()> {
        let lines = read_journal(table)?;
        if lines.is_empty() {
            println!("📜 Journal is empty.");
            return Ok(());
        }

        let entries: Vec<(usize, String, String, String, String)> = lines
            .into_iter()
            .enumerate()
            .map(|(i, l)| {
                let date = chrono::DateTime::parse_from_rfc3339(&l.date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or(l.date);
                let op_target = if l.target.is_empty() {
                    l.operation.clone()
                } else {
                    format!("{} ({})", l.operation, l.target)
                };
                (i + 1, date, l.operation, op_target, l.message)
            })
            .collect();

        let op_w = entries
            .iter()
            .map(|(_, _, _, op_target, _)| op_target.len())
            .max()
            .unwrap_or(10)
            .min(60);
        let id_w = entries.len().to_string().len();
        let date_w = entries
            .iter()
            .map(|(_, date, _, _, _)| date.len())
            .max()
            .unwrap_or(0);

        println!("📜 Journal:\n");

        for (id, date, operation, op_target, message) in entries {
            let color = color_for_operation(&operation);

            // --- TRUNCATE a 60 caratteri SENZA ANSI ---
            let visible = if op_target.chars().count() > 60 {
                let mut s = op_target.chars().take(57).collect::<String>();
                s.push_str("...");
                s
            } else {
                op_target
            };

            // solo la prima parola (operazione) è colorata
            let colored = match visible.split_once(' ') {
                Some((op_word, rest)) => format!("{} {}", color.paint(op_word), rest),
                None => color.paint(visible.as_str()).to_string(),
            };

            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&colored).len()));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                id,
                date,
                colored,
                padding,
                message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
