/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const REVERSE: &str = "\x1b[7m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

/// Timestamps that do not parse are shown in red, the others in cyan.
pub fn colorize_timestamp(value: &str, valid: bool) -> String {
    if value.trim().is_empty() {
        format!("{GREY}--:--:--:---{RESET}")
    } else if valid {
        format!("{CYAN}{value}{RESET}")
    } else {
        format!("{RED}{value}{RESET}")
    }
}

/// Whitespace/control keys get a readable name.
pub fn key_label(key: &str) -> String {
    match key {
        " " => "<space>".to_string(),
        "\t" => "<tab>".to_string(),
        k if k.chars().any(char::is_control) => format!("{:?}", k),
        k => k.to_string(),
    }
}

pub fn colorize_key(key: &str) -> String {
    format!("{BOLD}{}{RESET}", key_label(key))
}

/// Reverse video for the selected row.
pub fn highlight(line: &str) -> String {
    format!("{REVERSE}{line}{RESET}")
}
