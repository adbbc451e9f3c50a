//! Raw record → canonical row mapping.
//!
//! Each raw row is projected onto the fixed 20-column schema: known
//! columns are looked up by name (first occurrence wins), date columns
//! go through the normalizer, and everything the export lacks becomes
//! an empty string. The Sprint column is the deliberate exception to
//! first-occurrence lookup; see [`first_sprint_value`].

use tickets_core::dates::normalize_date;
use tickets_core::schema::{is_date_field, CanonicalRow, CANONICAL_FIELDS, SPRINT_FIELD};

use crate::reader::RawTable;

/// Map one raw row onto the canonical schema.
///
/// `row` must already be padded to the header width (the reader
/// guarantees this); indices past the row end still degrade to `""`
/// rather than panicking.
pub fn normalize_row(row: &[String], table: &RawTable) -> CanonicalRow {
    let mut out = CanonicalRow::default();
    for name in CANONICAL_FIELDS {
        let value = if name == SPRINT_FIELD {
            first_sprint_value(row, &table.header)
        } else {
            let raw = table
                .name_to_idx
                .get(name)
                .and_then(|&idx| row.get(idx))
                .map(String::as_str)
                .unwrap_or("");
            if is_date_field(name) {
                normalize_date(raw)
            } else {
                raw.to_string()
            }
        };
        out.set_field(name, value);
    }
    out
}

/// Map every raw row in `table`, preserving input order.
pub fn normalize_table(table: &RawTable) -> Vec<CanonicalRow> {
    table
        .rows
        .iter()
        .map(|row| normalize_row(row, table))
        .collect()
}

/// Resolve the Sprint columns by content instead of position.
///
/// An export carries one Sprint column per sprint cycle the issue ever
/// belonged to, so the same name legitimately repeats. Scan them left
/// to right and keep the first non-empty trimmed value; all empty means
/// the issue was never sprinted.
pub fn first_sprint_value(row: &[String], header: &[String]) -> String {
    for (i, name) in header.iter().enumerate() {
        if name == SPRINT_FIELD {
            if let Some(value) = row.get(i) {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    return trimmed.to_string();
                }
            }
        }
    }
    String::new()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
