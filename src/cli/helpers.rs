//! Shared helper functions for CLI commands

use console::style;

/// Truncate a string to max_len, adding "..." if truncated
///
/// Useful for table columns that need fixed-width output.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}

/// Escape a string for CSV output
///
/// Handles commas, quotes, and newlines according to RFC 4180.
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Color a status value the way the dashboard does
pub fn style_status(status: &str) -> String {
    let styled = match status.to_lowercase().as_str() {
        "online" => style(status).green(),
        "offline" => style(status).red(),
        "error" => style(status).red().bold(),
        "pending" => style(status).yellow(),
        _ => style(status).dim(),
    };
    styled.to_string()
}
