//! Remote sync adapter: Jira REST API → canonical rows → Google Sheets.
//!
//! A second, independent producer of the canonical 20-column schema.
//! It fetches issues page by page, maps each to a [`CanonicalRow`]
//! identical in shape to the CSV normalizer's output, and bulk-replaces
//! a named range in a spreadsheet sink. All of the API's heterogeneous
//! field-shape handling stays inside this crate.
//!
//! [`CanonicalRow`]: tickets_core::schema::CanonicalRow

pub mod client;
pub mod config;
pub mod row;
pub mod sheet;

use anyhow::Result;
use tracing::info;

/// Run one full sync pass: fetch every issue matching the configured
/// JQL, map to canonical rows, replace the sheet contents. Returns the
/// number of rows written.
pub async fn run_sync(config: &config::SyncConfig) -> Result<usize> {
    let jira = client::JiraClient::new(config)?;

    let field_names = jira.fetch_fields().await?;
    info!("Resolved {} field names", field_names.len());

    let issues = jira.fetch_all_issues(&config.jql).await?;
    info!("Fetched {} issues", issues.len());

    let rows: Vec<_> = issues
        .iter()
        .map(|issue| row::issue_to_row(issue, &field_names))
        .collect();

    let sheets = sheet::SheetsClient::new(config)?;
    sheets.replace_all(&rows).await?;

    info!("Synced {} rows to sheet {}", rows.len(), config.sheet_id);
    Ok(rows.len())
}
