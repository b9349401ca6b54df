use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::session::Session;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::utils::path::expand_tilde;
use crate::utils::time::{format_offset, parse_start_time};

/// Handle the `init` command
///
/// This initializes:
///  - the log table for the source (header only, replacing an older one)
///  - the session state (empty history, optional start time)
///  - the configuration file, which remembers the table as the active log
///    (skipped in test mode)
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Init { source, start } = &cli.command {
        //
        // 1️⃣ START TIME: validato prima di toccare il disco
        //
        let mut session_cfg = cfg.clone();
        if let Some(t) = start {
            parse_start_time(t)?;
            session_cfg.default_start_time = Some(t.clone());
        }

        let target = cli.log.as_deref().map(expand_tilde);
        let table = target
            .clone()
            .unwrap_or_else(|| cfg.table_for_source(source));

        if table.exists() {
            warning(format!("Replacing existing log: {}", table.display()));
        }

        //
        // 2️⃣ NUOVA SESSIONE: --log vince sulla cartella di output
        //
        let session = match &target {
            Some(path) => Session::create(&session_cfg, path)?,
            None => Session::init_for_source(&session_cfg, source)?,
        };
        let table = session.table().to_path_buf();

        info(format!("🎬 Source     : {}", source));
        info(format!("📄 Log file   : {}", table.display()));
        info(format!(
            "⏱️  Start time : {}",
            format_offset(session.start_offset())
        ));

        //
        // 3️⃣ CONFIG: il nuovo log diventa quello attivo
        //
        if !cli.test {
            let mut stored = Config::load()?;
            stored.current_log = Some(table.to_string_lossy().to_string());
            stored.save()?;
            info(format!("⚙️  Config file: {}", Config::config_file().display()));
        }

        success("Session initialized. Log keys with `keymark log <KEY> --ms <ELAPSED>`.");
    }

    Ok(())
}
