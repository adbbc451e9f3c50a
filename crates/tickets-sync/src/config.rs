//! Environment-driven configuration for the sync pass.
//!
//! Credentials are secrets (CI provides them as secret env vars), so
//! unlike the normalizer's CLI flags the sync adapter reads everything
//! from the environment once at startup.

use tickets_core::error::{Result, TicketsError};

/// All parameters for one sync pass, resolved once at process start.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Jira Cloud base URL, e.g. `https://example.atlassian.net`.
    pub jira_base_url: String,
    pub jira_email: String,
    pub jira_api_token: String,
    /// JQL query selecting the issues to sync.
    pub jql: String,
    /// Spreadsheet id from the sheet URL.
    pub sheet_id: String,
    /// Tab name whose range gets replaced.
    pub sheet_tab: String,
    /// OAuth bearer token with the spreadsheets scope.
    pub sheets_token: String,
}

impl SyncConfig {
    /// Read the configuration from the environment.
    ///
    /// `JIRA_EMAIL`, `JIRA_API_TOKEN`, `GOOGLE_SHEET_ID` and
    /// `GOOGLE_SHEETS_TOKEN` are required; the rest have defaults.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            jira_base_url: std::env::var("JIRA_BASE_URL")
                .unwrap_or_else(|_| "https://starbemapp.atlassian.net".to_string())
                .trim_end_matches('/')
                .to_string(),
            jira_email: required("JIRA_EMAIL")?,
            jira_api_token: required("JIRA_API_TOKEN")?,
            jql: std::env::var("JIRA_JQL").unwrap_or_else(|_| "order by created DESC".to_string()),
            sheet_id: required("GOOGLE_SHEET_ID")?,
            sheet_tab: std::env::var("GOOGLE_SHEET_TAB").unwrap_or_else(|_| "Tickets".to_string()),
            sheets_token: required("GOOGLE_SHEETS_TOKEN")?,
        })
    }
}

fn required(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| TicketsError::Config(format!("{name} is not set")))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_missing_var_is_config_error() {
        let err = required("TICKETS_SYNC_TEST_UNSET_VAR").unwrap_err();
        assert!(matches!(err, TicketsError::Config(_)));
        assert!(err.to_string().contains("TICKETS_SYNC_TEST_UNSET_VAR"));
    }
}
