use crate::cli::commands::{open_session, show_entries};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::history::DeleteTarget;
use crate::errors::AppResult;
use crate::ui::messages::{hint, success};
use crate::utils::colors::{colorize_key, colorize_timestamp};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { index } = cmd {
        let mut session = open_session(cfg)?;

        let target = match index {
            Some(i) => DeleteTarget::Index(*i),
            None => DeleteTarget::Last,
        };

        let outcome = session.delete(target)?;
        let removed = &outcome.removed;

        success(format!(
            "Deleted #{}: {} at {}",
            outcome.index,
            colorize_key(&removed.key),
            colorize_timestamp(&removed.timestamp, removed.parsed_timestamp().is_some())
        ));
        hint("Use `keymark undo` to restore it.");

        show_entries(&session, outcome.highlight, cfg.tail_lines)?;
    }

    Ok(())
}
