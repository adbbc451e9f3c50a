//! Read-only filtering over a loaded ticket table.

use chrono::NaiveDate;
use tickets_core::schema::CanonicalRow;

/// Independent, ANDed filters the presentation layer applies before
/// aggregating. An empty set means "no restriction" for that column.
#[derive(Debug, Clone, Default)]
pub struct TicketFilters {
    pub status: Vec<String>,
    pub priority: Vec<String>,
    pub assignee: Vec<String>,
    pub product_area: Vec<String>,
    /// Inclusive lower bound on the Created date.
    pub created_min: Option<NaiveDate>,
    /// Inclusive upper bound on the Created date.
    pub created_max: Option<NaiveDate>,
}

impl TicketFilters {
    /// True when no filter restricts anything.
    pub fn is_empty(&self) -> bool {
        self.status.is_empty()
            && self.priority.is_empty()
            && self.assignee.is_empty()
            && self.product_area.is_empty()
            && self.created_min.is_none()
            && self.created_max.is_none()
    }

    /// Does `row` survive every active filter?
    ///
    /// Date bounds only apply to rows whose Created value parses; a
    /// degraded (unparseable) Created string fails an active date
    /// filter, matching how the dashboard coerces before comparing.
    pub fn matches(&self, row: &CanonicalRow) -> bool {
        if !self.status.is_empty() && !self.status.iter().any(|s| s == &row.status) {
            return false;
        }
        if !self.priority.is_empty() && !self.priority.iter().any(|p| p == &row.priority) {
            return false;
        }
        if !self.assignee.is_empty() && !self.assignee.iter().any(|a| a == &row.assignee) {
            return false;
        }
        if !self.product_area.is_empty()
            && !self.product_area.iter().any(|p| p == &row.product_area)
        {
            return false;
        }

        if self.created_min.is_some() || self.created_max.is_some() {
            let Some(created) = created_date(row) else {
                return false;
            };
            if let Some(min) = self.created_min {
                if created < min {
                    return false;
                }
            }
            if let Some(max) = self.created_max {
                if created > max {
                    return false;
                }
            }
        }

        true
    }

    /// Return the rows that survive, preserving table order.
    pub fn apply<'a>(&self, rows: &'a [CanonicalRow]) -> Vec<&'a CanonicalRow> {
        rows.iter().filter(|row| self.matches(row)).collect()
    }
}

/// Parse the date part of a canonical Created value.
pub(crate) fn created_date(row: &CanonicalRow) -> Option<NaiveDate> {
    let date_part = row.created.split(' ').next()?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
