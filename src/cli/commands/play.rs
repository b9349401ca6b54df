use crate::cli::commands::{open_session, show_entries};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::controls::{Action, Playhead, TapeEvent, action_for, parse_tape_line};
use crate::core::history::DeleteTarget;
use crate::core::session::Session;
use crate::errors::AppResult;
use crate::ui::messages::{hint, info, success, warning};
use crate::utils::colors::key_label;
use crate::utils::time::{format_offset, parse_start_time};
use std::io::{self, BufRead};

const CONTROLS: &str = "Controls: space=Play/Pause | =/-=Speed | ; ' [ ] { }=Skip 5s/5m/1h | , .=Frame | \
backspace=Undo & Pause | q=Quit | any other key=Log";

/// What happened during a playback run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaySummary {
    pub logged: usize,
    pub skipped: usize,
    pub removed: usize,
    pub final_frame: u64,
    pub reached_end: bool,
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Play { frames, fps } = cmd {
        let mut session = open_session(cfg)?;
        let playhead = Playhead::new(*frames, *fps);

        info(CONTROLS);
        if !session.is_start_fixed() {
            hint("The video starts paused. Send `start HH:MM:SS` to set the start time.");
        }

        let summary = run_tape(&mut session, playhead, io::stdin().lock(), cfg.tail_lines)?;

        success(format!(
            "Session ended at frame {}: {} logged, {} removed, {} skipped",
            summary.final_frame, summary.logged, summary.removed, summary.skipped
        ));
    }

    Ok(())
}

/// Drive `session` with one key event per input line until `q`, end of
/// video or end of input.
pub fn run_tape(
    session: &mut Session,
    mut playhead: Playhead,
    input: impl BufRead,
    tail_lines: usize,
) -> AppResult<PlaySummary> {
    let mut summary = PlaySummary::default();

    for line in input.lines() {
        let line = line?;

        let event = match parse_tape_line(&line) {
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(e) => {
                warning(e);
                continue;
            }
        };

        match event {
            TapeEvent::Advance(n) => {
                if playhead.advance(n) {
                    info("End of video.");
                    summary.reached_end = true;
                    break;
                }
            }
            TapeEvent::Seek(frame) => playhead.seek(frame),
            TapeEvent::Start(text) => {
                // formato errato: l'operatore riprova con un'altra riga
                match parse_start_time(&text).and_then(|o| session.set_start_offset(o)) {
                    Ok(()) => success(format!(
                        "Start time set to {}",
                        format_offset(session.start_offset())
                    )),
                    Err(e) => warning(e),
                }
            }
            TapeEvent::Key(key) => match action_for(key) {
                Action::Quit => break,
                Action::Log(c) => {
                    let key = c.to_string();
                    match session.record_at_frame(&key, playhead.frame_pos, playhead.fps)? {
                        Some(entry) => {
                            summary.logged += 1;
                            success(format!(
                                "Logged: {} at {}",
                                key_label(&entry.key),
                                entry.timestamp
                            ));
                        }
                        None => {
                            summary.skipped += 1;
                            warning(format!("Key '{}' already logged: skipped", key_label(&key)));
                        }
                    }
                    show_entries(session, None, tail_lines)?;
                }
                Action::UndoLast => {
                    match session.delete(DeleteTarget::Last) {
                        Ok(outcome) => {
                            summary.removed += 1;
                            success(format!("Last observation removed: {}", outcome.removed));
                        }
                        Err(e) if e.is_notice() => warning(e),
                        Err(e) => return Err(e),
                    }
                    playhead.apply(Action::UndoLast);
                    show_entries(session, None, tail_lines)?;
                }
                action @ (Action::SpeedUp | Action::SlowDown) => {
                    playhead.apply(action);
                    info(format!("Speed: {}x", playhead.speed));
                }
                action => playhead.apply(action),
            },
        }
    }

    summary.final_frame = playhead.frame_pos;
    Ok(summary)
}
