//! Google Sheets sink.
//!
//! Full-refresh semantics: clear columns A:T of the configured tab,
//! then write the canonical header plus every row in one values
//! update. The sheet always holds exactly one producer pass.

use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::{json, Value};
use tickets_core::schema::{CanonicalRow, CANONICAL_FIELDS};
use tracing::debug;

use crate::config::SyncConfig;

const SHEETS_API: &str = "https://sheets.googleapis.com/v4/spreadsheets";

pub struct SheetsClient {
    http: reqwest::Client,
    sheet_id: String,
    tab: String,
    token: String,
}

impl SheetsClient {
    pub fn new(config: &SyncConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            http,
            sheet_id: config.sheet_id.clone(),
            tab: config.sheet_tab.clone(),
            token: config.sheets_token.clone(),
        })
    }

    /// Replace the tab's 20-column range with header + `rows`.
    pub async fn replace_all(&self, rows: &[CanonicalRow]) -> Result<()> {
        // A:T spans exactly the 20 canonical columns.
        let range = format!("'{}'!A:T", self.tab);

        let clear_url = format!("{}/{}/values/{}:clear", SHEETS_API, self.sheet_id, range);
        self.http
            .post(&clear_url)
            .bearer_auth(&self.token)
            .json(&json!({}))
            .send()
            .await?
            .error_for_status()
            .context("clearing sheet range failed")?;
        debug!("Cleared range {}", range);

        let update_url = format!(
            "{}/{}/values/{}?valueInputOption=RAW",
            SHEETS_API, self.sheet_id, range
        );
        self.http
            .put(&update_url)
            .bearer_auth(&self.token)
            .json(&values_body(rows))
            .send()
            .await?
            .error_for_status()
            .context("writing sheet values failed")?;
        debug!("Wrote {} rows to range {}", rows.len(), range);

        Ok(())
    }
}

/// Build the values payload: header first, then each row in canonical
/// column order.
pub fn values_body(rows: &[CanonicalRow]) -> Value {
    let mut values: Vec<Vec<String>> = Vec::with_capacity(rows.len() + 1);
    values.push(CANONICAL_FIELDS.iter().map(|s| s.to_string()).collect());
    for row in rows {
        values.push(row.to_record().iter().map(|s| s.to_string()).collect());
    }
    json!({ "values": values })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
