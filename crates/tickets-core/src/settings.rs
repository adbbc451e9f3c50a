use clap::{Parser, ValueEnum};
use std::path::PathBuf;

// ── Input encoding ────────────────────────────────────────────────────────────

/// Text encoding of the raw export file.
///
/// Jira Cloud exports UTF-8, but spreadsheets that passed through older
/// Windows tooling occasionally arrive as Latin-1.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    #[value(name = "utf-8")]
    Utf8,
    #[value(name = "latin-1")]
    Latin1,
}

// ── NormalizeSettings ─────────────────────────────────────────────────────────

/// Normalize a raw Jira CSV export into the clean 20-column table
#[derive(Parser, Debug, Clone)]
#[command(
    name = "jira-normalize",
    about = "Normalize a raw Jira CSV export into the clean 20-column table",
    version
)]
pub struct NormalizeSettings {
    /// Raw export CSV
    #[arg(default_value = "Jira.csv")]
    pub input: PathBuf,

    /// Clean output CSV
    #[arg(default_value = "jira_tickets_clean.csv")]
    pub output: PathBuf,

    /// Encoding of the input file
    #[arg(long, value_enum, default_value_t = Encoding::Utf8)]
    pub encoding: Encoding,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,
}

// ── ReportSettings ────────────────────────────────────────────────────────────

/// Print summary views over a clean ticket table
#[derive(Parser, Debug, Clone)]
#[command(
    name = "jira-report",
    about = "Print summary views over a clean ticket table",
    version
)]
pub struct ReportSettings {
    /// Clean ticket table produced by jira-normalize
    #[arg(default_value = "jira_tickets_clean.csv")]
    pub table: PathBuf,

    /// Keep only these statuses (repeatable)
    #[arg(long)]
    pub status: Vec<String>,

    /// Keep only these priorities (repeatable)
    #[arg(long)]
    pub priority: Vec<String>,

    /// Keep only these assignees (repeatable)
    #[arg(long)]
    pub assignee: Vec<String>,

    /// Keep only these products/areas (repeatable)
    #[arg(long)]
    pub product: Vec<String>,

    /// Keep tickets created on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub created_from: Option<chrono::NaiveDate>,

    /// Keep tickets created on or before this date (YYYY-MM-DD)
    #[arg(long)]
    pub created_to: Option<chrono::NaiveDate>,

    /// Time bucket for the created-date trend
    #[arg(long, default_value = "month", value_parser = ["day", "week", "month"])]
    pub bucket: String,

    /// How many entries to show in top-N breakdowns
    #[arg(long, default_value = "5")]
    pub top: usize,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
