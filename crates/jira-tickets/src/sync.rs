//! `jira-sync`: fetch issues from the Jira API and bulk-replace the
//! spreadsheet sink with canonical rows. Configured entirely from the
//! environment; see `tickets_sync::config`.

use std::process::ExitCode;

use clap::Parser;
use tickets_sync::config::SyncConfig;

/// Sync Jira issues into the Google Sheets ticket table
#[derive(Parser, Debug)]
#[command(
    name = "jira-sync",
    about = "Sync Jira issues into the Google Sheets ticket table",
    version
)]
struct SyncArgs {
    /// Override the JQL query from JIRA_JQL
    #[arg(long)]
    jql: Option<String>,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    log_level: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = SyncArgs::parse();

    if let Err(e) = jira_tickets::bootstrap::setup_logging(&args.log_level) {
        eprintln!("Failed to set up logging: {e}");
        return ExitCode::FAILURE;
    }

    let mut config = match SyncConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(jql) = args.jql {
        config.jql = jql;
    }

    match tickets_sync::run_sync(&config).await {
        Ok(count) => {
            println!("Synced {count} rows");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Sync failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}
