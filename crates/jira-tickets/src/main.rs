//! `jira-normalize`: raw export in, clean 20-column table out.

use std::process::ExitCode;

use clap::Parser;
use tickets_core::error::TicketsError;
use tickets_core::settings::NormalizeSettings;
use tickets_data::pipeline;

fn main() -> ExitCode {
    let settings = NormalizeSettings::parse();

    if let Err(e) = jira_tickets::bootstrap::setup_logging(&settings.log_level) {
        eprintln!("Failed to set up logging: {e}");
        return ExitCode::FAILURE;
    }

    tracing::info!(
        "jira-normalize v{}: {} -> {}",
        env!("CARGO_PKG_VERSION"),
        settings.input.display(),
        settings.output.display()
    );

    match pipeline::normalize_file(&settings.input, &settings.output, settings.encoding) {
        Ok(count) => {
            println!("Wrote {} rows to {}", count, settings.output.display());
            ExitCode::SUCCESS
        }
        Err(e @ TicketsError::InputNotFound(_)) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Normalization failed: {e}");
            ExitCode::FAILURE
        }
    }
}
