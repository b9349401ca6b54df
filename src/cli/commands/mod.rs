pub mod backup;
pub mod clear;
pub mod config;
pub mod del;
pub mod export;
pub mod history;
pub mod init;
pub mod journal;
pub mod list;
pub mod log;
pub mod play;
pub mod sort;
pub mod start;

use crate::config::Config;
use crate::core::session::Session;
use crate::errors::{AppError, AppResult};
use crate::utils::table::entries_table;
use std::path::PathBuf;

/// Table selected by `--log` or by the last `init`.
pub(crate) fn require_log(cfg: &Config) -> AppResult<PathBuf> {
    cfg.active_log().ok_or_else(|| {
        AppError::Config("No active log: run `keymark init <VIDEO>` or pass --log <FILE>".into())
    })
}

pub(crate) fn open_session(cfg: &Config) -> AppResult<Session> {
    Session::open(cfg, &require_log(cfg)?)
}

/// Print a window of `n` entries around `selected` (the tail when none).
pub(crate) fn show_entries(session: &Session, selected: Option<usize>, n: usize) -> AppResult<()> {
    let all = session.tail(usize::MAX)?;
    if all.is_empty() {
        println!("(log is empty)");
        return Ok(());
    }

    let n = n.max(1);
    let start = match selected {
        Some(i) => i.saturating_sub(n / 2).min(all.len().saturating_sub(n)),
        None => all.len().saturating_sub(n),
    };
    let end = (start + n).min(all.len());

    print!("{}", entries_table(&all[start..end], selected));
    Ok(())
}
