use crate::cli::commands::{open_session, show_entries};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::table::entries_table;

/// Handle the read-only views: `tail`, `list`, `search`
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::Tail { lines } => {
            let session = open_session(cfg)?;
            let n = lines.unwrap_or(cfg.tail_lines);
            header(format!("Last {} entries", n));
            show_entries(&session, None, n)?;
        }
        Commands::List => {
            let session = open_session(cfg)?;
            let all = session.tail(usize::MAX)?;
            header(format!("{} ({} entries)", session.table().display(), all.len()));
            if all.is_empty() {
                println!("(log is empty)");
            } else {
                print!("{}", entries_table(&all, None));
            }
        }
        Commands::Search { text } => {
            let session = open_session(cfg)?;
            let hits = session.search(text)?;

            if hits.is_empty() {
                info(format!("No entries matching '{}'", text));
            } else {
                header(format!("{} entries matching '{}'", hits.len(), text));
                print!("{}", entries_table(&hits, None));
            }
        }
        _ => {}
    }

    Ok(())
}
