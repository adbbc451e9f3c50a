//! `jira-report`: read-only summary views over a clean ticket table.
//!
//! This is the plain-text face of the presentation contract: load the
//! table, apply the sidebar-style filters, print counts, a trend and
//! top-N breakdowns. It never writes the artifact back.

use std::collections::BTreeMap;
use std::process::ExitCode;

use clap::Parser;
use tickets_core::error::TicketsError;
use tickets_core::settings::ReportSettings;
use tickets_data::aggregator::{self, TimeBucket};
use tickets_data::filters::TicketFilters;
use tickets_data::table;

fn main() -> ExitCode {
    let settings = ReportSettings::parse();

    if let Err(e) = jira_tickets::bootstrap::setup_logging(&settings.log_level) {
        eprintln!("Failed to set up logging: {e}");
        return ExitCode::FAILURE;
    }

    let rows = match table::load_clean_table(&settings.table) {
        Ok(rows) => rows,
        Err(e @ TicketsError::InputNotFound(_)) => {
            eprintln!(
                "No data found: {e}. Run jira-normalize first or point at an existing table."
            );
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("Could not load table: {e}");
            return ExitCode::FAILURE;
        }
    };

    let filters = TicketFilters {
        status: settings.status,
        priority: settings.priority,
        assignee: settings.assignee,
        product_area: settings.product,
        created_min: settings.created_from,
        created_max: settings.created_to,
    };
    let kept = filters.apply(&rows);

    println!("Tickets: {} ({} after filters)", rows.len(), kept.len());

    print_counts("By status", &aggregator::counts_by_field(&kept, "Status"));
    print_counts("By priority", &aggregator::counts_by_field(&kept, "Priority"));
    print_counts("By type", &aggregator::counts_by_field(&kept, "Issue Type"));

    let bucket = TimeBucket::from_name(&settings.bucket);
    print_counts(
        &format!("Created per {}", settings.bucket),
        &aggregator::counts_by_bucket(&kept, bucket),
    );

    print_top(
        &format!("Top {} assignees", settings.top),
        &aggregator::top_n(&kept, "Assignee", settings.top),
    );
    print_top(
        &format!("Top {} products", settings.top),
        &aggregator::top_n(&kept, "Product/Area", settings.top),
    );

    ExitCode::SUCCESS
}

fn print_counts(title: &str, counts: &BTreeMap<String, usize>) {
    println!("\n{title}:");
    if counts.is_empty() {
        println!("  (none)");
        return;
    }
    for (value, count) in counts {
        let label = if value.is_empty() { "(empty)" } else { value };
        println!("  {label:<30} {count}");
    }
}

fn print_top(title: &str, entries: &[(String, usize)]) {
    println!("\n{title}:");
    if entries.is_empty() {
        println!("  (none)");
        return;
    }
    for (value, count) in entries {
        println!("  {value:<30} {count}");
    }
}
