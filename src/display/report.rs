//! Report formatting utilities for terminal output
//!
//! Width helpers count characters, not bytes, so Arabic labels line up.

use crate::models::currency::finite_or_zero;

/// Format a percentage with one decimal, as the breakdown shows it
pub fn format_percentage(pct: f64) -> String {
    format!("{:.1}%", finite_or_zero(pct))
}

/// Share of `value` in `total` as a percentage; zero when the total is not positive
pub fn percentage_of(value: f64, total: f64) -> f64 {
    if total > 0.0 {
        finite_or_zero(value / total * 100.0)
    } else {
        0.0
    }
}

/// Gram quantity the way notes print it: at most two decimals, no trailing zeros
pub fn format_quantity(value: f64) -> String {
    let rounded = (finite_or_zero(value) * 100.0).round() / 100.0;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{}", rounded)
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a header line with padding
pub fn format_header(title: &str, width: usize) -> String {
    let len = display_width(title);
    let padding = if len >= width { 0 } else { (width - len) / 2 };
    format!("{}{}", " ".repeat(padding), title)
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Number of characters a string occupies
pub fn display_width(s: &str) -> usize {
    s.chars().count()
}

/// Truncate a string to a maximum length with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if display_width(s) <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

/// Right-align text in a field of given width
pub fn right_align(s: &str, width: usize) -> String {
    let len = display_width(s);
    if len >= width {
        s.to_string()
    } else {
        format!("{}{}", " ".repeat(width - len), s)
    }
}

/// Left-align text in a field of given width
pub fn left_align(s: &str, width: usize) -> String {
    let len = display_width(s);
    if len >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - len))
    }
}
