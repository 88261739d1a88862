//! Date helper functions

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;

/// Format a date using a Moment.js-compatible format string
///
/// # Examples
/// ```ignore
/// format_date(&date, "YYYY-MM-DD") // -> "2025-10-22"
/// ```
pub fn format_date(date: &NaiveDate, format: &str) -> String {
    let chrono_format = moment_to_chrono_format(format);
    let items: Vec<Item> = StrftimeItems::new(&chrono_format).collect();

    // Formatting an invalid specifier would panic; use ISO dates instead
    if items.iter().any(|item| matches!(item, Item::Error)) {
        tracing::warn!("Invalid date format {:?}, using YYYY-MM-DD", format);
        return date.format("%Y-%m-%d").to_string();
    }

    date.format_with_items(items.into_iter()).to_string()
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    // Longest patterns first within each group
    let replacements = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("DDDD", "%j"),
        ("DD", "%d"),
        ("dddd", "%A"),
        ("ddd", "%a"),
    ];

    let mut result = format.to_string();

    for (from, to) in replacements {
        result = result.replace(from, to);
    }

    result
}
