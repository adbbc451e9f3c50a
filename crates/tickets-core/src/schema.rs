//! The canonical ticket row schema.
//!
//! Every producer (CSV normalizer, remote sync adapter) emits rows in
//! exactly this shape, and every consumer reads it back. The column set
//! and order are fixed; a missing source field is an empty string, never
//! an absent column.

use serde::{Deserialize, Serialize};

// ── Canonical column set ──────────────────────────────────────────────────────

/// The 20 output columns, in the order they appear in the clean table.
pub const CANONICAL_FIELDS: [&str; 20] = [
    "Summary",
    "Issue key",
    "Issue id",
    "Issue Type",
    "Status",
    "Project key",
    "Project name",
    "Priority",
    "Resolution",
    "Assignee",
    "Reporter",
    "Created",
    "Updated",
    "Resolved",
    "Due date",
    "Team Name",
    "Sprint",
    "Product/Area",
    "Status Category",
    "Status Category Changed",
];

/// Columns whose values are date strings and go through
/// [`crate::dates::normalize_date`] during mapping.
pub const DATE_FIELDS: [&str; 5] = [
    "Created",
    "Updated",
    "Resolved",
    "Due date",
    "Status Category Changed",
];

/// The one column where several same-named source columns are resolved
/// by content (first non-empty) instead of by position.
pub const SPRINT_FIELD: &str = "Sprint";

/// Returns `true` when `name` is one of the [`DATE_FIELDS`].
pub fn is_date_field(name: &str) -> bool {
    DATE_FIELDS.contains(&name)
}

// ── CanonicalRow ──────────────────────────────────────────────────────────────

/// One normalized ticket. Field order matches [`CANONICAL_FIELDS`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRow {
    pub summary: String,
    pub issue_key: String,
    pub issue_id: String,
    pub issue_type: String,
    pub status: String,
    pub project_key: String,
    pub project_name: String,
    pub priority: String,
    pub resolution: String,
    pub assignee: String,
    pub reporter: String,
    pub created: String,
    pub updated: String,
    pub resolved: String,
    pub due_date: String,
    pub team_name: String,
    pub sprint: String,
    pub product_area: String,
    pub status_category: String,
    pub status_category_changed: String,
}

impl CanonicalRow {
    /// All 20 values in canonical column order.
    pub fn to_record(&self) -> [&str; 20] {
        [
            &self.summary,
            &self.issue_key,
            &self.issue_id,
            &self.issue_type,
            &self.status,
            &self.project_key,
            &self.project_name,
            &self.priority,
            &self.resolution,
            &self.assignee,
            &self.reporter,
            &self.created,
            &self.updated,
            &self.resolved,
            &self.due_date,
            &self.team_name,
            &self.sprint,
            &self.product_area,
            &self.status_category,
            &self.status_category_changed,
        ]
    }

    /// Build a row from values in canonical column order.
    ///
    /// Shorter input leaves trailing fields empty; extra values are
    /// ignored. Used by the consumer side when loading a clean table.
    pub fn from_record<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row = Self::default();
        for (i, value) in values.into_iter().enumerate().take(20) {
            *row.field_mut_by_index(i) = value.into();
        }
        row
    }

    /// Look up a field value by its canonical column name.
    pub fn field(&self, name: &str) -> Option<&str> {
        CANONICAL_FIELDS
            .iter()
            .position(|&f| f == name)
            .map(|i| self.to_record()[i])
    }

    /// Set a field value by canonical column name. Unknown names are
    /// ignored.
    pub fn set_field(&mut self, name: &str, value: String) {
        if let Some(i) = CANONICAL_FIELDS.iter().position(|&f| f == name) {
            *self.field_mut_by_index(i) = value;
        }
    }

    fn field_mut_by_index(&mut self, index: usize) -> &mut String {
        match index {
            0 => &mut self.summary,
            1 => &mut self.issue_key,
            2 => &mut self.issue_id,
            3 => &mut self.issue_type,
            4 => &mut self.status,
            5 => &mut self.project_key,
            6 => &mut self.project_name,
            7 => &mut self.priority,
            8 => &mut self.resolution,
            9 => &mut self.assignee,
            10 => &mut self.reporter,
            11 => &mut self.created,
            12 => &mut self.updated,
            13 => &mut self.resolved,
            14 => &mut self.due_date,
            15 => &mut self.team_name,
            16 => &mut self.sprint,
            17 => &mut self.product_area,
            18 => &mut self.status_category,
            19 => &mut self.status_category_changed,
            _ => unreachable!("canonical schema has 20 columns"),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
