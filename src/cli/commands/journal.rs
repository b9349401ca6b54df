use crate::cli::commands::require_log;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::journal::JournalLogic;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Journal { print: true }) {
        let table = require_log(cfg)?;
        JournalLogic::print_journal(&table)?;
    }

    Ok(())
}
