use crate::cli::commands::{open_session, show_entries};
use crate::cli::parser::{Commands, Position};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use crate::utils::colors::key_label;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { key, position } = cmd {
        if key.is_empty() {
            return Err(AppError::InvalidKeyEvent("empty key".into()));
        }

        let mut session = open_session(cfg)?;

        let logged = match position {
            Position { ms: Some(ms), .. } => {
                if !ms.is_finite() || *ms < 0.0 {
                    return Err(AppError::Other(format!(
                        "Elapsed time must be a non-negative number of milliseconds: {ms}"
                    )));
                }
                session.record(key, *ms)?
            }
            Position {
                frame: Some(frame),
                fps: Some(fps),
                ..
            } => session.record_at_frame(key, *frame, *fps)?,
            _ => {
                return Err(AppError::Other(
                    "Missing playback position: use --ms, or --frame with --fps".into(),
                ));
            }
        };

        match logged {
            Some(entry) => {
                success(format!(
                    "Logged: {} at {}",
                    key_label(&entry.key),
                    entry.timestamp
                ));
                show_entries(&session, None, cfg.tail_lines)?;
            }
            None => warning(format!(
                "Key '{}' not logged: duplicate under the '{}' policy",
                key_label(key),
                session.log().policy().as_str()
            )),
        }
    }

    Ok(())
}
