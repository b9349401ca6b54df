use crate::cli::commands::{open_session, show_entries};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Sort) {
        let session = open_session(cfg)?;
        session.sort()?;

        success(format!(
            "Log sorted by timestamp ({} entries)",
            session.log().len()?
        ));
        show_entries(&session, None, cfg.tail_lines)?;
    }

    Ok(())
}
