//! Time utilities: timestamp formatting, start-time parsing, frame → ms conversion.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveTime, TimeDelta, Timelike};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;

static TIMESTAMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{2,}):([0-9]{2}):([0-9]{2}):([0-9]{3})$").expect("valid timestamp regex")
});

static START_COMPACT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{2})([0-9]{2})([0-9]{2})$").expect("valid regex"));

static START_COLON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{2}):([0-9]{2}):([0-9]{2})$").expect("valid regex"));

/// Absolute session timestamp, stored as total milliseconds.
///
/// Rendered as `HH:MM:SS:mmm`; the hour field is not wrapped at 24 and grows
/// beyond two digits when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.0 / MS_PER_HOUR;
        let minutes = (self.0 % MS_PER_HOUR) / MS_PER_MINUTE;
        let seconds = (self.0 % MS_PER_MINUTE) / MS_PER_SECOND;
        let millis = self.0 % MS_PER_SECOND;
        write!(f, "{:02}:{:02}:{:02}:{:03}", hours, minutes, seconds, millis)
    }
}

impl FromStr for Timestamp {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::InvalidTimestamp(s.to_string());
        let caps = TIMESTAMP_RE.captures(s.trim()).ok_or_else(invalid)?;

        let field = |i: usize| -> Result<u64, AppError> {
            caps[i].parse::<u64>().map_err(|_| invalid())
        };

        let (h, m, sec, ms) = (field(1)?, field(2)?, field(3)?, field(4)?);
        if m >= 60 || sec >= 60 {
            return Err(invalid());
        }

        h.checked_mul(MS_PER_HOUR)
            .and_then(|v| v.checked_add(m * MS_PER_MINUTE + sec * MS_PER_SECOND + ms))
            .map(Timestamp)
            .ok_or_else(invalid)
    }
}

/// Build the absolute timestamp string for a playback position.
///
/// `elapsed_ms` is rounded to whole microseconds and then truncated to whole
/// milliseconds. Negative or non-finite input is clamped to zero.
pub fn format_timestamp(elapsed_ms: f64, start_offset: TimeDelta) -> String {
    to_timestamp(elapsed_ms, start_offset).to_string()
}

pub fn to_timestamp(elapsed_ms: f64, start_offset: TimeDelta) -> Timestamp {
    let micros = if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
        (elapsed_ms * 1000.0).round() as i64
    } else {
        0
    };

    let total = start_offset + TimeDelta::microseconds(micros);
    Timestamp::from_millis(total.num_milliseconds().max(0) as u64)
}

/// Parse the session start time typed by the operator.
///
/// Accepts `HHMMSS` (exactly six digits) or `HH:MM:SS` with two-digit fields.
pub fn parse_start_time(text: &str) -> AppResult<TimeDelta> {
    let t = text.trim();
    let caps = START_COMPACT_RE
        .captures(t)
        .or_else(|| START_COLON_RE.captures(t))
        .ok_or_else(|| AppError::InvalidFormat(text.to_string()))?;

    let h: u32 = caps[1].parse().unwrap_or(u32::MAX);
    let m: u32 = caps[2].parse().unwrap_or(u32::MAX);
    let s: u32 = caps[3].parse().unwrap_or(u32::MAX);

    let time =
        NaiveTime::from_hms_opt(h, m, s).ok_or_else(|| AppError::InvalidFormat(text.to_string()))?;

    Ok(TimeDelta::seconds(i64::from(time.num_seconds_from_midnight())))
}

/// Render a start offset as `HH:MM:SS` (hours unbounded).
pub fn format_offset(offset: TimeDelta) -> String {
    let secs = offset.num_seconds().max(0);
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Milliseconds elapsed at a given frame; zero when the frame rate is unknown.
pub fn elapsed_ms_from_frame(frame_idx: u64, fps: f64) -> f64 {
    if fps > 0.0 {
        frame_idx as f64 / fps * 1000.0
    } else {
        0.0
    }
}
