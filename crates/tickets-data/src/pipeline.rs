//! The whole normalization pass: read, map, write.

use std::path::Path;

use tickets_core::error::Result;
use tickets_core::settings::Encoding;
use tracing::info;

use crate::{mapper, reader, writer};

/// Run one normalization pass and return the number of rows written.
///
/// The two phases are strictly sequential: every raw row is read and
/// mapped before the first byte of output is staged. Identical input
/// bytes produce identical output bytes.
pub fn normalize_file(input: &Path, output: &Path, encoding: Encoding) -> Result<usize> {
    let table = reader::read_raw_csv(input, encoding)?;
    let rows = mapper::normalize_table(&table);
    writer::write_clean_csv(output, &rows)?;

    info!(
        "Normalized {} rows from {} into {}",
        rows.len(),
        input.display(),
        output.display()
    );
    Ok(rows.len())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
