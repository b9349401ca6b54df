//! keymark library root.
//! Exposes CLI parser, high-level run() function, and the event log engine.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use ui::messages::warning;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init { .. } => cli::commands::init::handle(cli, cfg),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Start { .. } => cli::commands::start::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Del { .. } => cli::commands::del::handle(&cli.command, cfg),
        Commands::Undo | Commands::Redo => cli::commands::history::handle(&cli.command, cfg),
        Commands::Sort => cli::commands::sort::handle(&cli.command, cfg),
        Commands::Clear { .. } => cli::commands::clear::handle(&cli.command, cfg),
        Commands::Tail { .. } | Commands::List | Commands::Search { .. } => {
            cli::commands::list::handle(&cli.command, cfg)
        }
        Commands::Journal { .. } => cli::commands::journal::handle(&cli.command, cfg),
        Commands::Play { .. } => cli::commands::play::handle(&cli.command, cfg),
        Commands::Backup { .. } => cli::commands::backup::handle(&cli.command, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
    }
}

/// Entry point usato da main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ carica config UNA sola volta
    let mut cfg = Config::load()?;

    // 3️⃣ applica eventuali override da riga di comando
    if let Some(custom_log) = &cli.log {
        cfg.current_log = Some(custom_log.clone());
    }
    if let Some(policy) = cli.policy {
        cfg.duplicate_policy = policy;
    }

    // 4️⃣ passa tutto al dispatcher; "niente da annullare" non è un errore
    match dispatch(&cli, &cfg) {
        Err(e) if e.is_notice() => {
            warning(e);
            Ok(())
        }
        other => other,
    }
}
