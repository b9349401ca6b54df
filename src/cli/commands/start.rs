use crate::cli::commands::open_session;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::time::{format_offset, parse_start_time};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Start { time } = cmd {
        let offset = parse_start_time(time)?;

        let mut session = open_session(cfg)?;
        session.set_start_offset(offset)?;

        success(format!("Start time set to {}", format_offset(offset)));
    }

    Ok(())
}
