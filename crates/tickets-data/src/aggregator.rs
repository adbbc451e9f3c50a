//! Read-only aggregate views over canonical rows.
//!
//! Everything here returns derived data for display; nothing mutates or
//! persists the table.

use std::collections::BTreeMap;

use chrono::Datelike;
use tickets_core::schema::CanonicalRow;

use crate::filters::created_date;

// ── Time buckets ──────────────────────────────────────────────────────────────

/// Granularity of the created-date trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBucket {
    Day,
    IsoWeek,
    Month,
}

impl TimeBucket {
    /// Parse a user-facing bucket name. Unknown names fall back to
    /// monthly, the dashboard default.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "day" | "daily" => TimeBucket::Day,
            "week" | "weekly" => TimeBucket::IsoWeek,
            _ => TimeBucket::Month,
        }
    }

    fn key_for(&self, date: chrono::NaiveDate) -> String {
        match self {
            TimeBucket::Day => date.format("%Y-%m-%d").to_string(),
            TimeBucket::IsoWeek => {
                let week = date.iso_week();
                format!("{}-W{:02}", week.year(), week.week())
            }
            TimeBucket::Month => date.format("%Y-%m").to_string(),
        }
    }
}

// ── Aggregations ──────────────────────────────────────────────────────────────

/// Count rows per distinct value of `field` (a canonical column name).
///
/// Empty values are counted under `""` so the caller can decide whether
/// to show them. The map is ordered for deterministic display.
pub fn counts_by_field(rows: &[&CanonicalRow], field: &str) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for row in rows {
        let value = row.field(field).unwrap_or("");
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Count rows per time bucket of their Created date.
///
/// Rows whose Created value does not parse (degraded passthrough
/// strings, empty fields) are skipped, not counted as a bucket.
pub fn counts_by_bucket(rows: &[&CanonicalRow], bucket: TimeBucket) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for row in rows {
        if let Some(date) = created_date(row) {
            *counts.entry(bucket.key_for(date)).or_insert(0) += 1;
        }
    }
    counts
}

/// The `n` most frequent non-empty values of `field`.
///
/// Ordered by count descending, then value ascending so ties are
/// stable.
pub fn top_n(rows: &[&CanonicalRow], field: &str, n: usize) -> Vec<(String, usize)> {
    let counts = counts_by_field(rows, field);
    let mut entries: Vec<(String, usize)> = counts
        .into_iter()
        .filter(|(value, _)| !value.is_empty())
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(n);
    entries
}

// ── Tests ─────────────────────────────────────────────────────────────────────
