use crate::cli::commands::require_log;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::errors::AppResult;
use crate::utils::path::expand_tilde;
use std::io;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup { file, compress } = cmd {
        let table = require_log(cfg)?;
        BackupLogic::backup(
            &table,
            &expand_tilde(file),
            *compress,
            &mut io::stdin().lock(),
        )?;
    }

    Ok(())
}
