use crate::cli::commands::{open_session, show_entries};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::colors::{colorize_key, colorize_timestamp};

/// Handle `undo` and `redo`
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::Undo => {
            let mut session = open_session(cfg)?;
            let restored = session.undo()?;

            success(format!("Restored entry at #{restored}"));
            show_entries(&session, Some(restored), cfg.tail_lines)?;
        }
        Commands::Redo => {
            let mut session = open_session(cfg)?;
            let removed = session.redo()?;

            success(format!(
                "Deleted again: {} at {}",
                colorize_key(&removed.key),
                colorize_timestamp(&removed.timestamp, removed.parsed_timestamp().is_some())
            ));
            show_entries(&session, None, cfg.tail_lines)?;
        }
        _ => {}
    }

    Ok(())
}
