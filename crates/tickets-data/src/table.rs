//! Consumer-side loading of a clean ticket table.

use std::path::Path;

use tickets_core::error::{Result, TicketsError};
use tickets_core::schema::CanonicalRow;
use tracing::{debug, warn};

/// Load a clean table wholesale into memory.
///
/// The loader is positional: values map onto the canonical schema by
/// column order, which both producers guarantee. A header that does not
/// look canonical gets a warning but is still read, so a hand-edited
/// table keeps working.
pub fn load_clean_table(path: &Path) -> Result<Vec<CanonicalRow>> {
    if !path.exists() {
        return Err(TicketsError::InputNotFound(path.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(TicketsError::Csv)?;

    if let Ok(header) = reader.headers() {
        if header.get(0) != Some("Summary") {
            warn!(
                "Table {} does not start with the canonical header",
                path.display()
            );
        }
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(CanonicalRow::from_record(record.iter()));
    }

    debug!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
