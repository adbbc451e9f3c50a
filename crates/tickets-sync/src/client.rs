//! Jira Cloud REST client.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::debug;

use crate::config::SyncConfig;

const PAGE_SIZE: u64 = 100;

/// Thin wrapper over the Jira Cloud v3 REST API, authenticated with
/// email + API token basic auth.
pub struct JiraClient {
    http: reqwest::Client,
    base: String,
    email: String,
    token: String,
}

impl JiraClient {
    pub fn new(config: &SyncConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            http,
            base: config.jira_base_url.clone(),
            email: config.jira_email.clone(),
            token: config.jira_api_token.clone(),
        })
    }

    /// Fetch the field catalogue and return id → display name.
    ///
    /// Custom fields come back from the search API keyed as
    /// `customfield_NNNNN`; this map is what lets the row mapper find
    /// "Team Name", "Sprint" and "Produto" among them.
    pub async fn fetch_fields(&self) -> Result<HashMap<String, String>> {
        let url = format!("{}/rest/api/3/field", self.base);
        let fields: Vec<Value> = self
            .http
            .get(&url)
            .basic_auth(&self.email, Some(&self.token))
            .header("Accept", "application/json")
            .send()
            .await?
            .error_for_status()
            .context("field catalogue request failed")?
            .json()
            .await?;

        Ok(field_names_by_id(&fields))
    }

    /// Fetch every issue matching `jql`, following `startAt` pagination
    /// until the reported total is reached.
    pub async fn fetch_all_issues(&self, jql: &str) -> Result<Vec<Value>> {
        let url = format!("{}/rest/api/3/search", self.base);
        let mut issues: Vec<Value> = Vec::new();
        let mut start: u64 = 0;

        loop {
            let start_at = start.to_string();
            let max_results = PAGE_SIZE.to_string();
            let page: Value = self
                .http
                .get(&url)
                .basic_auth(&self.email, Some(&self.token))
                .header("Accept", "application/json")
                .query(&[
                    ("jql", jql),
                    ("startAt", start_at.as_str()),
                    ("maxResults", max_results.as_str()),
                    ("expand", "names"),
                ])
                .send()
                .await?
                .error_for_status()
                .context("issue search request failed")?
                .json()
                .await?;

            let total = page.get("total").and_then(Value::as_u64).unwrap_or(0);
            let batch = page
                .get("issues")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            let fetched = batch.len() as u64;

            debug!("Fetched {} issues at offset {} of {}", fetched, start, total);
            issues.extend(batch);

            match next_page_offset(start, fetched, total) {
                Some(next) => start = next,
                None => break,
            }
        }

        Ok(issues)
    }
}

/// Decide where the next search page starts, or `None` when the fetch
/// is done.
///
/// Done means the reported total has been reached, or the server sent
/// an empty page. The empty-page stop matters: a total that overstates
/// the real issue count must not spin the loop forever.
pub fn next_page_offset(start: u64, fetched: u64, total: u64) -> Option<u64> {
    if fetched == 0 {
        return None;
    }
    let next = start + fetched;
    if next >= total {
        None
    } else {
        Some(next)
    }
}

/// Build the id → name map from a field catalogue payload. Fields with
/// no name fall back to their id.
pub fn field_names_by_id(fields: &[Value]) -> HashMap<String, String> {
    let mut by_id = HashMap::new();
    for field in fields {
        let Some(id) = field.get("id").and_then(Value::as_str) else {
            continue;
        };
        let name = field
            .get("name")
            .and_then(Value::as_str)
            .filter(|n| !n.is_empty())
            .unwrap_or(id);
        by_id.insert(id.to_string(), name.to_string());
    }
    by_id
}

// ── Tests ─────────────────────────────────────────────────────────────────────
