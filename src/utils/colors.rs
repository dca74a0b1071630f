/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Open shifts in yellow, finished ones in green.
pub fn color_for_status(finished: bool) -> &'static str {
    if finished { GREEN } else { YELLOW }
}

/// Amount color:
/// \>0 → green
/// 0 → grey
pub fn color_for_amount(value: f64) -> &'static str {
    if value > 0.0 { GREEN } else { GREY }
}

/// Grey placeholder for empty cells.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--" {
        format!("{GREY}--{RESET}")
    } else {
        value.to_string()
    }
}
