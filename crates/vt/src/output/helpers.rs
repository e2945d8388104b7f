//! Common helper functions for output formatting.

use chrono::NaiveDate;
use owo_colors::OwoColorize;
use vault_tasks::Priority;

/// Human-readable label for a status character.
pub fn status_label(status: char) -> String {
    match status {
        ' ' => "Open".to_string(),
        '/' => "In Progress".to_string(),
        'x' => "Done".to_string(),
        '-' => "Cancelled".to_string(),
        other => format!("Custom ({other})"),
    }
}

/// Capitalized priority name, or `Normal` when the task has none.
pub fn priority_label(priority: Option<Priority>) -> String {
    let Some(priority) = priority else {
        return "Normal".to_string();
    };

    let name = priority.name();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Formats one `glyph date` pair, highlighting overdue and current dates.
pub fn format_date(glyph: char, date: NaiveDate, today: NaiveDate, use_colors: bool) -> String {
    let display = format!("{glyph} {date}");

    if !use_colors {
        return display;
    }
    if date < today {
        display.red().to_string()
    } else if date == today {
        display.yellow().to_string()
    } else {
        display
    }
}
