use crate::cli::commands::open_session;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        sorted,
        force,
    } = cmd
    {
        let session = open_session(cfg)?;
        ExportLogic::export(session.log(), *format, &expand_tilde(file), *sorted, *force)?;
    }
    Ok(())
}
