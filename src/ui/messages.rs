//! Status lines printed by the commands.
//!
//! Everything goes to stdout except errors, so a piped `list` or `tail`
//! still carries the warnings that explain it.

use crate::utils::colors::{BLUE, BOLD, GREEN, GREY, RED, RESET, YELLOW};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    fn color(self) -> &'static str {
        match self {
            Level::Info => BLUE,
            Level::Success => GREEN,
            Level::Warning => YELLOW,
            Level::Error => RED,
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Level::Info => "ℹ️",
            Level::Success => "✅",
            Level::Warning => "⚠️",
            Level::Error => "❌",
        }
    }
}

fn render(level: Level, msg: &dyn fmt::Display) -> String {
    format!("{}{}{} {}{}", level.color(), BOLD, level.icon(), RESET, msg)
}

fn emit(level: Level, msg: &dyn fmt::Display) {
    let line = render(level, msg);
    match level {
        Level::Error => eprintln!("{line}"),
        _ => println!("{line}"),
    }
}

pub fn info<T: fmt::Display>(msg: T) {
    emit(Level::Info, &msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    emit(Level::Success, &msg);
}

/// Notices too: "Nothing to undo", skipped duplicates.
pub fn warning<T: fmt::Display>(msg: T) {
    emit(Level::Warning, &msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    emit(Level::Error, &msg);
}

/// Dimmed, no icon.
pub fn hint<T: fmt::Display>(msg: T) {
    println!("{GREY}{msg}{RESET}");
}

/// Title line above a table listing.
pub fn header<T: fmt::Display>(msg: T) {
    println!("{BLUE}{BOLD}=== {msg} ==={RESET}\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_puts_icon_before_reset() {
        let line = render(Level::Warning, &"Nothing to undo");
        assert!(line.starts_with(YELLOW));
        assert!(line.ends_with(&format!("⚠️ {RESET}Nothing to undo")));
    }

    #[test]
    fn test_each_level_has_its_own_color() {
        let levels = [Level::Info, Level::Success, Level::Warning, Level::Error];
        for (i, a) in levels.iter().enumerate() {
            for b in &levels[i + 1..] {
                assert_ne!(a.color(), b.color());
                assert_ne!(a.icon(), b.icon());
            }
        }
    }
}
