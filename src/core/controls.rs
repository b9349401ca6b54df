//! Player key bindings and playhead state.
//!
//! Only the position bookkeeping lives here; decoding and drawing frames is
//! the player's job. The playhead tells the session where playback is, so a
//! logged key gets the timestamp of the frame on screen.

use crate::errors::{AppError, AppResult};
use crate::utils::time::elapsed_ms_from_frame;

pub const BACKSPACE: char = '\u{8}';

const SPEED_STEP: f64 = 0.25;
const SPEED_MIN: f64 = 0.25;
const SPEED_MAX: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Quit,
    TogglePause,
    SpeedUp,
    SlowDown,
    PrevFrame,
    NextFrame,
    /// Jump by this many seconds (negative = back).
    Skip(i64),
    /// Remove the last observation and pause.
    UndoLast,
    /// Any key without a binding is an observation.
    Log(char),
}

/// Map a key press to its action.
pub fn action_for(key: char) -> Action {
    match key {
        'q' => Action::Quit,
        ' ' => Action::TogglePause,
        '=' => Action::SpeedUp,
        '-' => Action::SlowDown,
        ',' => Action::PrevFrame,
        '.' => Action::NextFrame,
        ';' => Action::Skip(-5),
        '\'' => Action::Skip(5),
        '[' => Action::Skip(-5 * 60),
        ']' => Action::Skip(5 * 60),
        '{' => Action::Skip(-60 * 60),
        '}' => Action::Skip(60 * 60),
        BACKSPACE => Action::UndoLast,
        other => Action::Log(other),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Playhead {
    pub frame_pos: u64,
    pub frame_count: u64,
    pub fps: f64,
    pub speed: f64,
    pub paused: bool,
}

impl Playhead {
    /// Playback starts paused on the first frame at 1x.
    pub fn new(frame_count: u64, fps: f64) -> Self {
        Self {
            frame_pos: 0,
            frame_count,
            fps,
            speed: 1.0,
            paused: true,
        }
    }

    pub fn last_frame(&self) -> u64 {
        self.frame_count.saturating_sub(1)
    }

    pub fn elapsed_ms(&self) -> f64 {
        elapsed_ms_from_frame(self.frame_pos, self.fps)
    }

    /// Apply the playback part of an action. `Quit` and `Log` do not move
    /// the playhead.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::TogglePause => self.paused = !self.paused,
            Action::SpeedUp => self.speed = (self.speed + SPEED_STEP).min(SPEED_MAX),
            Action::SlowDown => self.speed = (self.speed - SPEED_STEP).max(SPEED_MIN),
            Action::PrevFrame => {
                self.frame_pos = self.frame_pos.saturating_sub(1);
                self.paused = true;
            }
            Action::NextFrame => {
                self.frame_pos = (self.frame_pos + 1).min(self.last_frame());
                self.paused = true;
            }
            Action::Skip(seconds) => {
                let frames = (self.fps.max(0.0) * seconds.unsigned_abs() as f64) as u64;
                self.frame_pos = if seconds < 0 {
                    self.frame_pos.saturating_sub(frames)
                } else {
                    self.frame_pos.saturating_add(frames).min(self.last_frame())
                };
            }
            Action::UndoLast => self.paused = true,
            Action::Quit | Action::Log(_) => {}
        }
    }

    /// Slider drag: jump to `frame` and pause.
    pub fn seek(&mut self, frame: u64) {
        self.frame_pos = frame.min(self.last_frame());
        self.paused = true;
    }

    /// Let `frames` frames play. Returns `true` once the end is reached.
    pub fn advance(&mut self, frames: u64) -> bool {
        if self.paused {
            return false;
        }
        let target = self.frame_pos.saturating_add(frames);
        self.frame_pos = target.min(self.last_frame());
        target > self.last_frame()
    }
}

/// One line of a key tape fed to the `play` loop.
#[derive(Debug, Clone, PartialEq)]
pub enum TapeEvent {
    Key(char),
    Advance(u64),
    Seek(u64),
    Start(String),
}

/// Parse a tape line. Blank lines and `#` comments yield `None`.
pub fn parse_tape_line(line: &str) -> AppResult<Option<TapeEvent>> {
    // uno spazio da solo è un tasto, non una riga vuota
    if line == " " {
        return Ok(Some(TapeEvent::Key(' ')));
    }

    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let invalid = || AppError::InvalidKeyEvent(line.to_string());
    let mut parts = trimmed.split_whitespace();
    let word = parts.next().ok_or_else(invalid)?;
    let arg = parts.next();

    let event = match (word, arg) {
        ("space", None) => TapeEvent::Key(' '),
        ("backspace", None) => TapeEvent::Key(BACKSPACE),
        ("advance", Some(n)) => TapeEvent::Advance(n.parse().map_err(|_| invalid())?),
        ("seek", Some(n)) => TapeEvent::Seek(n.parse().map_err(|_| invalid())?),
        ("start", Some(t)) => TapeEvent::Start(t.to_string()),
        (w, None) => {
            let mut chars = w.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => TapeEvent::Key(c),
                _ => return Err(invalid()),
            }
        }
        _ => return Err(invalid()),
    };

    Ok(Some(event))
}
