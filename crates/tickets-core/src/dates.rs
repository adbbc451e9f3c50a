//! Date normalization for raw ticket exports.
//!
//! Jira exports carry timestamps in whatever locale the exporting
//! browser happened to use, so a handful of formats show up in the same
//! column. [`normalize_date`] tries a fixed, ordered list of patterns
//! and renders the first match as `YYYY-MM-DD HH:MM:SS`. A value no
//! pattern recognises is returned verbatim: downstream consumers prefer
//! a visibly odd string over a hole in the table.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

/// Canonical rendering for every normalized timestamp.
pub const CANONICAL_DATETIME: &str = "%Y-%m-%d %H:%M:%S";

/// Canonical rendering for values that carry no time component.
pub const CANONICAL_DATE: &str = "%Y-%m-%d";

/// Recognised input patterns, tried in order. The order is a priority:
/// several of these are ambiguous subsets of one another, so the first
/// successful parse wins and reordering changes results.
///
/// The bool marks date-only patterns, which parse via [`NaiveDate`] and
/// render as midnight.
const DATE_FORMATS: [(&str, bool); 7] = [
    ("%d/%b/%y %I:%M %p", false),  // 10/Dec/25 8:43 AM
    ("%d/%b./%y %H:%M", false),    // 22/jan./26 10:04
    ("%d/%b/%y %H:%M", false),     // 19/Dec/25 14:38
    ("%Y-%m-%d %H:%M:%S%.f", false), // 2025-12-10 11:44:34.17
    ("%d/%b./%y %I:%M %p", false),
    ("%d/%b/%y", true),
    ("%Y-%m-%d", true),
];

/// Normalize a raw date string to `YYYY-MM-DD HH:MM:SS`.
///
/// * Empty or whitespace-only input → `""`.
/// * The first matching pattern in [`DATE_FORMATS`] wins.
/// * When nothing matches, the first 19 characters are retried against
///   the canonical formats (exports sometimes append stray precision).
/// * When every attempt fails the input is returned unchanged; this
///   function never fails.
pub fn normalize_date(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    for (fmt, date_only) in DATE_FORMATS {
        if date_only {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
                return render_midnight(date);
            }
        } else if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return dt.format(CANONICAL_DATETIME).to_string();
        }
    }

    // Last resort: drop trailing precision/garbage and retry the
    // canonical shapes on the first 19 characters.
    let prefix: String = trimmed.chars().take(19).collect();
    if let Ok(dt) = NaiveDateTime::parse_from_str(&prefix, CANONICAL_DATETIME) {
        return dt.format(CANONICAL_DATETIME).to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(&prefix, CANONICAL_DATE) {
        // A space in the original means a time component was intended.
        return if trimmed.contains(' ') {
            render_midnight(date)
        } else {
            date.format(CANONICAL_DATE).to_string()
        };
    }

    debug!("normalize_date: no pattern matched \"{}\"", trimmed);
    value.to_string()
}

fn render_midnight(date: NaiveDate) -> String {
    // NaiveDate::and_hms_opt(0, 0, 0) is always valid.
    match date.and_hms_opt(0, 0, 0) {
        Some(dt) => dt.format(CANONICAL_DATETIME).to_string(),
        None => date.format(CANONICAL_DATE).to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
