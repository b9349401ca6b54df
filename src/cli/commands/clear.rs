use crate::cli::commands::open_session;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::fs_utils::confirm;
use crate::ui::messages::{info, success, warning};
use std::io;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Clear { force } = cmd {
        let mut session = open_session(cfg)?;
        let count = session.log().len()?;

        //
        // Confirmation prompt
        //
        if !force {
            warning(format!(
                "Remove ALL {} entries from {}? Undo history is reset too.",
                count,
                session.table().display()
            ));
            if !confirm("Confirm [y/N]: ", &mut io::stdin().lock())? {
                info("Operation cancelled.");
                return Ok(());
            }
        }

        session.clear()?;
        success(format!("Log cleared ({count} entries removed)."));
    }

    Ok(())
}
